use std::fmt;

#[derive(Debug, Clone)]
pub enum SnipError {
    Validation(String),
    NotFound(String),
    GenerationExhausted(String),
    InvalidIdentifier(String),
    StoreConnection(String),
    StoreOperation(String),
}

impl SnipError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            SnipError::Validation(_) => "E001",
            SnipError::NotFound(_) => "E002",
            SnipError::GenerationExhausted(_) => "E003",
            SnipError::InvalidIdentifier(_) => "E004",
            SnipError::StoreConnection(_) => "E005",
            SnipError::StoreOperation(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            SnipError::Validation(_) => "Validation Error",
            SnipError::NotFound(_) => "Resource Not Found",
            SnipError::GenerationExhausted(_) => "Id Generation Exhausted",
            SnipError::InvalidIdentifier(_) => "Invalid Identifier",
            SnipError::StoreConnection(_) => "Store Connection Error",
            SnipError::StoreOperation(_) => "Store Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            SnipError::Validation(msg) => msg,
            SnipError::NotFound(msg) => msg,
            SnipError::GenerationExhausted(msg) => msg,
            SnipError::InvalidIdentifier(msg) => msg,
            SnipError::StoreConnection(msg) => msg,
            SnipError::StoreOperation(msg) => msg,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SnipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SnipError {}

// 便捷的构造函数
impl SnipError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        SnipError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SnipError::NotFound(msg.into())
    }

    pub fn generation_exhausted<T: Into<String>>(msg: T) -> Self {
        SnipError::GenerationExhausted(msg.into())
    }

    pub fn invalid_identifier<T: Into<String>>(msg: T) -> Self {
        SnipError::InvalidIdentifier(msg.into())
    }

    pub fn store_connection<T: Into<String>>(msg: T) -> Self {
        SnipError::StoreConnection(msg.into())
    }

    pub fn store_operation<T: Into<String>>(msg: T) -> Self {
        SnipError::StoreOperation(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<redis::RedisError> for SnipError {
    fn from(err: redis::RedisError) -> Self {
        SnipError::StoreOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SnipError>;
