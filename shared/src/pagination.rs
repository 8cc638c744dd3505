//! 分页类型
//!
//! List endpoints take a [`PageRequest`] from the query string and answer
//! with a [`PaginatedResponse`].

use serde::{Deserialize, Serialize};

/// Upper bound for a page size requested by a client
pub const MAX_PAGE_SIZE: u32 = 100;

/// 分页请求 (页码从 1 开始)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 页码 (从 1 开始)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// 每页数量
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Page number, never below 1
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, falling back to `default_limit` and clamped to [1, MAX_PAGE_SIZE]
    pub fn limit_or(&self, default_limit: u32) -> u32 {
        self.limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset for `LIMIT ? OFFSET ?`
    pub fn offset(&self, default_limit: u32) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.limit_or(default_limit))
    }
}

/// 分页响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// 数据列表
    pub data: Vec<T>,
    /// 总记录数
    pub total: u64,
    /// 当前页码
    pub page: u32,
    /// 每页数量
    pub limit: u32,
    /// 总页数
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit > 0 {
            total.div_ceil(u64::from(limit)) as u32
        } else {
            1
        };

        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// 空结果页
    pub fn empty(page: u32, limit: u32) -> Self {
        Self::new(Vec::new(), 0, page, limit)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}
