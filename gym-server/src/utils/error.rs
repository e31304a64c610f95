//! 统一错误处理
//!
//! 错误类型来自 `shared::error`；这里把各层的库错误转换为 [`AppError`]，
//! 使 handler 可以直接 `?`。
//!
//! | 来源 | ErrorCode | HTTP |
//! |------|-----------|------|
//! | `ValidationError` | ValidationFailed | 400 |
//! | `RepoError::NotFound` | MemberNotFound | 404 |
//! | `RepoError::Corrupted` | MemberCorrupted | 500 |
//! | `RepoError::Database` | DatabaseError | 500 |
//! | `DispatchError::InvalidPhone` | ReminderInvalidPhone | 400 |
//! | `DispatchError::ChannelUnavailable` | ReminderDispatchFailed | 502 |

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::db::repository::RepoError;
use crate::membership::ValidationError;
use crate::notify::DispatchError;

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
            .with_detail("field", err.field.as_str())
            .with_detail("reason", err.reason.kind())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::MemberNotFound, msg),
            RepoError::Corrupted(msg) => {
                tracing::error!(error = %msg, "Stored member record is corrupted");
                AppError::with_message(ErrorCode::MemberCorrupted, msg)
            }
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        match &err {
            DispatchError::InvalidPhone(phone) => {
                AppError::with_message(ErrorCode::ReminderInvalidPhone, err.to_string())
                    .with_detail("phone", phone.as_str())
            }
            DispatchError::ChannelUnavailable(channel) => {
                AppError::with_message(ErrorCode::ReminderDispatchFailed, err.to_string())
                    .with_detail("channel", channel.as_str())
            }
        }
    }
}
