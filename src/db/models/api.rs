use serde::Serialize;

// 统一API响应结构
#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize, Debug)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            page,
            per_page,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// Normalized `page`/`limit` query parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;
    /// Keeps `(page - 1) * limit` inside `i64`.
    pub const MAX_PAGE: i64 = i64::MAX / Self::MAX_LIMIT;

    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, Self::MAX_PAGE),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of rows plus the total matching count.
#[derive(Debug)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub params: PageParams,
}

impl<T> Paged<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            params: self.params,
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.params.page, self.params.limit, self.total)
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

// 便捷构造函数
impl<T> ApiResponse<T> {
    pub fn success(data: T, message: &str) -> Self {
        Self {
            success: true,
            code: 200,
            message: message.to_string(),
            data: Some(data),
            meta: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn success_with_meta(data: T, message: &str, meta: ResponseMeta) -> Self {
        Self {
            success: true,
            code: 200,
            message: message.to_string(),
            data: Some(data),
            meta: Some(meta),
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn created(data: T, message: &str) -> Self {
        Self {
            success: true,
            code: 201,
            message: message.to_string(),
            data: Some(data),
            meta: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            code: 200,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: u16, error_code: &str, message: &str) -> Self {
        Self {
            success: false,
            code,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: Some(vec![ErrorDetail {
                field: None,
                code: error_code.to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn validation_error(errors: Vec<ErrorDetail>) -> Self {
        Self {
            success: false,
            code: 400,
            message: "Validation failed".to_string(),
            data: None,
            meta: None,
            errors: Some(errors),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::error(400, "BAD_REQUEST", message)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::error(401, "UNAUTHORIZED", message)
    }

    pub fn forbidden(message: &str) -> Self {
        Self::error(403, "FORBIDDEN", message)
    }

    pub fn not_found(message: &str) -> Self {
        Self::error(404, "NOT_FOUND", message)
    }

    pub fn duplicate(message: &str, field: Option<String>, error_code: &str) -> Self {
        Self {
            success: false,
            code: 400,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: Some(vec![ErrorDetail {
                field,
                code: error_code.to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self::error(500, "INTERNAL_ERROR", message)
    }

    pub fn service_unavailable(message: &str) -> Self {
        Self::error(503, "SERVICE_UNAVAILABLE", message)
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Wraps one page of results with pagination metadata.
    pub fn paginated(page: Paged<T>, message: &str) -> Self {
        let meta = ResponseMeta {
            request_id: None,
            pagination: Some(page.pagination()),
            total_count: Some(page.total),
            execution_time_ms: None,
        };
        Self::success_with_meta(page.items, message, meta)
    }
}

// 业务错误码常量
pub mod error_codes {
    pub const AUTH_INVALID_CREDENTIALS: &str = "AUTH_001";
    pub const AUTH_ACCOUNT_PENDING: &str = "AUTH_002";
    pub const AUTH_ACCOUNT_REJECTED: &str = "AUTH_003";
    pub const AUTH_INVALID_TOKEN: &str = "AUTH_004";

    pub const USER_EMAIL_EXISTS: &str = "USER_001";

    pub const VEHICLE_PLATE_EXISTS: &str = "VEHICLE_001";
}
