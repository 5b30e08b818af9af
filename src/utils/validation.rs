use crate::utils::error::{CoverageError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CoverageError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CoverageError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 原始碼根目錄可以是空字串（代表報告路徑直接從套件開始），但不能含有 NUL
pub fn validate_source_root(field_name: &str, root: &str) -> Result<()> {
    if root.contains('\0') {
        return Err(CoverageError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: root.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    if root.contains('\\') {
        return Err(CoverageError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: root.to_string(),
            reason: "Use '/' as the separator in the source root".to_string(),
        });
    }

    Ok(())
}
