//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps to HTTP status codes.

use serde::Serialize;

/// エラー種別の列挙体
///
/// アプリケーション全体で使用する閉じたエラー分類です。
/// 各バリアントは HTTP ステータスコードとワイヤ上の種別名にマッピングされます。
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::NotFound;
/// assert_eq!(kind.status_code(), 404);
/// assert_eq!(kind.as_str(), "NOTFOUND");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ErrorKind {
    /// 400 - 入力が不正、またはバリデーション失敗
    Invalid,
    /// 401 - 認証情報がない、不正、または期限切れ
    Unauthorized,
    /// 403 - 認証済みだが権限が不足
    Forbidden,
    /// 404 - 参照先のエンティティが存在しない
    NotFound,
    /// 409 - 一意制約違反
    Conflict,
    /// 503 - 依存する外部サービスに到達できない／タイムアウト
    Unavailable,
    /// 500 - 分類されていない障害
    Internal,
}

impl ErrorKind {
    /// HTTP ステータスコードを取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::Invalid.status_code(), 400);
    /// assert_eq!(ErrorKind::Unavailable.status_code(), 503);
    /// ```
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Invalid => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Unavailable => 503,
            ErrorKind::Internal => 500,
        }
    }

    /// ワイヤ上の種別名を取得
    ///
    /// エラーレスポンスの `message` フィールドに使われます。
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Invalid => "INVALID",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::NotFound => "NOTFOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Unavailable => "UNAVAILABLE",
            ErrorKind::Internal => "INTERNAL",
        }
    }

    /// サーバー側のエラーかどうかを判定
    ///
    /// 5xx系のエラーは `true` を返します。
    /// これらのエラーはログに記録すべきです。
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// クライアント側のエラーかどうかを判定
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        let code = self.status_code();
        code >= 400 && code < 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::Invalid.status_code(), 400);
        assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
        assert_eq!(ErrorKind::Forbidden.status_code(), 403);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::Conflict.status_code(), 409);
        assert_eq!(ErrorKind::Unavailable.status_code(), 503);
        assert_eq!(ErrorKind::Internal.status_code(), 500);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(ErrorKind::Invalid.to_string(), "INVALID");
        assert_eq!(ErrorKind::NotFound.to_string(), "NOTFOUND");
        assert_eq!(
            serde_json::to_string(&ErrorKind::Unavailable).unwrap(),
            "\"UNAVAILABLE\""
        );
    }

    #[test]
    fn test_is_server_error() {
        assert!(!ErrorKind::Invalid.is_server_error());
        assert!(!ErrorKind::Conflict.is_server_error());
        assert!(ErrorKind::Internal.is_server_error());
        assert!(ErrorKind::Unavailable.is_server_error());
    }

    #[test]
    fn test_is_client_error() {
        assert!(ErrorKind::Invalid.is_client_error());
        assert!(ErrorKind::Forbidden.is_client_error());
        assert!(!ErrorKind::Internal.is_client_error());
    }
}
