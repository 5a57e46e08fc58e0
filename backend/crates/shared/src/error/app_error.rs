//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::panic::Location;

use super::kind::ErrorKind;

/// 分類済みの障害に対して表示される汎用メッセージ
pub const GENERIC_SERVER_MESSAGE: &str = "Server Error, Try Again later.";

/// アプリケーション統一エラー型
///
/// すべての層が最終的にこの型へ集約されます。
/// ビルダーパターンで構築し、構築後は変更しません。
///
/// ## Fields
/// * `kind` - エラーの分類（HTTP ステータスコードにマッピング）
/// * `op` - エラーを検出した操作名（例: `ReportRepository::create`）
/// * `messages` - ユーザー向けのエラーメッセージ（0 件以上）
/// * `location` - 障害を最初に検出した呼び出し位置（オプション）
/// * `source` - 元のエラー（オプション、デバッグ用）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// // シンプルなエラー
/// let err = AppError::not_found("UserRepository::get", "User Not Found");
/// assert_eq!(err.status_code(), 404);
///
/// // 生の障害を INTERNAL として包む
/// let io = std::io::Error::other("disk on fire");
/// let err = AppError::internal("ImageStore::save", io);
/// assert!(err.location().is_some());
/// ```
pub struct AppError {
    kind: ErrorKind,
    op: Cow<'static, str>,
    messages: Vec<Cow<'static, str>>,
    location: Option<&'static Location<'static>>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// アプリケーション結果型エイリアス
///
/// `Result<T, AppError>` の省略形です。
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 単一メッセージのエラーを作成
    ///
    /// ## Arguments
    /// * `kind` - エラー種別
    /// * `op` - 操作名
    /// * `message` - ユーザー向けメッセージ
    #[inline]
    pub fn new(
        kind: ErrorKind,
        op: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            op: op.into(),
            messages: vec![message.into()],
            location: None,
            source: None,
        }
    }

    /// 複数メッセージの INVALID エラーを作成（バリデーション結果用）
    pub fn validation<I, M>(op: impl Into<Cow<'static, str>>, messages: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Cow<'static, str>>,
    {
        Self {
            kind: ErrorKind::Invalid,
            op: op.into(),
            messages: messages.into_iter().map(Into::into).collect(),
            location: None,
            source: None,
        }
    }

    /// 生の障害を INTERNAL として包む
    ///
    /// 呼び出し位置を記録し、ユーザー向けメッセージは持ちません
    /// （レスポンスでは汎用メッセージが表示されます）。
    #[track_caller]
    pub fn internal<E>(op: impl Into<Cow<'static, str>>, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            kind: ErrorKind::Internal,
            op: op.into(),
            messages: Vec::new(),
            location: Some(Location::caller()),
            source: Some(Box::new(source)),
        }
    }

    // ========================================================================
    // Convenience constructors
    // ========================================================================

    /// 400 INVALID エラー
    #[inline]
    pub fn invalid(
        op: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Invalid, op, message)
    }

    /// 401 UNAUTHORIZED エラー
    #[inline]
    pub fn unauthorized(
        op: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Unauthorized, op, message)
    }

    /// 403 FORBIDDEN エラー
    #[inline]
    pub fn forbidden(
        op: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Forbidden, op, message)
    }

    /// 404 NOTFOUND エラー
    #[inline]
    pub fn not_found(
        op: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::NotFound, op, message)
    }

    /// 409 CONFLICT エラー
    #[inline]
    pub fn conflict(
        op: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Conflict, op, message)
    }

    /// 503 UNAVAILABLE エラー
    #[inline]
    pub fn unavailable(
        op: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Unavailable, op, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// 元のエラーを設定（デバッグ用）
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// 呼び出し位置を設定
    #[inline]
    pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
        self.location = Some(location);
        self
    }

    /// 層をまたぐ際に操作名を付け替える
    ///
    /// 種別とメッセージはそのまま保持されます。
    #[inline]
    pub fn with_op(mut self, op: impl Into<Cow<'static, str>>) -> Self {
        self.op = op.into();
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// エラー種別を取得
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP ステータスコードを取得
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// 操作名を取得
    #[inline]
    pub fn op(&self) -> &str {
        &self.op
    }

    /// ユーザー向けメッセージを取得（空の場合あり）
    #[inline]
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(|m| m.as_ref())
    }

    /// レスポンスに載せるメッセージを取得
    ///
    /// メッセージを持たないエラーは汎用メッセージに置き換えられ、
    /// 内部の詳細がクライアントに漏れることはありません。
    pub fn public_messages(&self) -> Vec<String> {
        if self.messages.is_empty() {
            vec![GENERIC_SERVER_MESSAGE.to_string()]
        } else {
            self.messages.iter().map(|m| m.to_string()).collect()
        }
    }

    /// 呼び出し位置を取得
    #[inline]
    pub fn location(&self) -> Option<&'static Location<'static>> {
        self.location
    }

    /// サーバーエラーかどうか
    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    /// クライアントエラーかどうか
    #[inline]
    pub fn is_client_error(&self) -> bool {
        self.kind.is_client_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("op", &self.op);
        builder.field("messages", &self.messages);
        if let Some(location) = &self.location {
            builder.field("location", location);
        }
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.op)?;
        if !self.messages.is_empty() {
            write!(f, ": {}", self.messages.join("; "))?;
        }
        if let Some(source) = &self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

// ============================================================================
// Result extension traits
// ============================================================================

/// `Result<T, E>` を `AppResult<T>` に変換するための拡張トレイト
pub trait ResultExt<T, E> {
    /// 生の障害を INTERNAL として包み、操作名と呼び出し位置を付与
    fn or_internal(self, op: &'static str) -> AppResult<T>
    where
        E: Error + Send + Sync + 'static;

    /// エラーを指定した種別とメッセージでラップ
    fn map_app_err(
        self,
        kind: ErrorKind,
        op: &'static str,
        message: impl Into<Cow<'static, str>>,
    ) -> AppResult<T>
    where
        E: Error + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    #[track_caller]
    fn or_internal(self, op: &'static str) -> AppResult<T>
    where
        E: Error + Send + Sync + 'static,
    {
        let location = Location::caller();
        self.map_err(|e| AppError::internal(op, e).with_location(location))
    }

    fn map_app_err(
        self,
        kind: ErrorKind,
        op: &'static str,
        message: impl Into<Cow<'static, str>>,
    ) -> AppResult<T>
    where
        E: Error + Send + Sync + 'static,
    {
        self.map_err(|e| AppError::new(kind, op, message).with_source(e))
    }
}

/// `Option<T>` を `AppResult<T>` に変換するための拡張トレイト
pub trait OptionExt<T> {
    /// `None` の場合に `AppError` を返す
    fn ok_or_app_err(
        self,
        kind: ErrorKind,
        op: &'static str,
        message: impl Into<Cow<'static, str>>,
    ) -> AppResult<T>;

    /// `None` の場合に 404 NOTFOUND を返す
    fn ok_or_not_found(
        self,
        op: &'static str,
        message: impl Into<Cow<'static, str>>,
    ) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_app_err(
        self,
        kind: ErrorKind,
        op: &'static str,
        message: impl Into<Cow<'static, str>>,
    ) -> AppResult<T> {
        self.ok_or_else(|| AppError::new(kind, op, message))
    }

    fn ok_or_not_found(
        self,
        op: &'static str,
        message: impl Into<Cow<'static, str>>,
    ) -> AppResult<T> {
        self.ok_or_app_err(ErrorKind::NotFound, op, message)
    }
}
