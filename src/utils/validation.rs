use crate::utils::error::{BojError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BojError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BojError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BojError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BojError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BojError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(BojError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 檢查要提交的原始碼檔案：必須存在、是一般檔案且非空
pub fn validate_source_file(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| BojError::ValidationError {
        message: format!("Cannot read source file '{}': {}", path.display(), e),
    })?;

    if !metadata.is_file() {
        return Err(BojError::ValidationError {
            message: format!("'{}' is not a regular file", path.display()),
        });
    }

    if metadata.len() == 0 {
        return Err(BojError::ValidationError {
            message: format!("Source file '{}' is empty", path.display()),
        });
    }

    Ok(())
}

pub fn validate_problem_number(number: u32) -> Result<()> {
    // BOJ 題號從 1000 開始
    if number < 1000 {
        return Err(BojError::ValidationError {
            message: format!("Invalid problem number: {}", number),
        });
    }
    Ok(())
}
