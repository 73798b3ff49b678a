//! # Canonical Log Line ミドルウェア
//!
//! HTTP リクエスト完了時に、そのリクエストの重要情報を1行に集約した
//! サマリログ（Canonical Log Line）を出力する tower Layer。
//!
//! [Canonical Log Lines パターン](https://brandur.org/canonical-log-lines)
//! に基づき、ログの検索性・集計性を向上させる。
//!
//! ## 既存 TraceLayer との責務分離
//!
//! - TraceLayer: スパン作成（method, uri, request_id）
//! - CanonicalLogLineLayer: リクエスト完了サマリ（method, path, status, latency）
//!
//! TraceLayer のスパン内に配置することで、`request_id` が JSON ログに自動的に含まれる。
//!
//! ## ログレベル
//!
//! | 結果 | レベル |
//! |------|--------|
//! | 5xx 以外のレスポンス | INFO |
//! | 5xx レスポンス（メール送信失敗など） | WARN |
//! | Service エラー | ERROR |

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use http::{Request, Response};
use tower::{Layer, Service};

/// ヘルスチェックパスかどうかを判定する
fn is_health_check_path(path: &str) -> bool {
    path.starts_with("/health")
}

/// Canonical Log Line を出力する Layer
///
/// リクエスト完了時に `log.type = "canonical"` マーカー付きの
/// サマリログを出力する。ヘルスチェックパスは出力対象外。
///
/// ```text
/// TraceLayer → CanonicalLogLineLayer → [他のミドルウェア] → handler
/// ```
#[derive(Clone, Debug)]
pub struct CanonicalLogLineLayer;

impl<S> Layer<S> for CanonicalLogLineLayer {
    type Service = CanonicalLogLineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CanonicalLogLineService { inner }
    }
}

/// Canonical Log Line を出力する Service
///
/// [`CanonicalLogLineLayer`] が生成する Service 実装。
#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Display + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // clone-swap パターン: poll_ready で得た readiness を保持する inner を使う
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let path = req.uri().path().to_owned();

        if is_health_check_path(&path) {
            return Box::pin(async move { inner.call(req).await });
        }

        let method = req.method().to_string();
        let start = Instant::now();

        Box::pin(async move {
            let result = inner.call(req).await;
            let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(response) if response.status().is_server_error() => {
                    tracing::warn!(
                        log.r#type = "canonical",
                        http.method = %method,
                        http.path = %path,
                        http.status_code = response.status().as_u16(),
                        http.latency_ms = latency_ms,
                        "リクエスト完了（サーバーエラー）"
                    );
                }
                Ok(response) => {
                    tracing::info!(
                        log.r#type = "canonical",
                        http.method = %method,
                        http.path = %path,
                        http.status_code = response.status().as_u16(),
                        http.latency_ms = latency_ms,
                        "リクエスト完了"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        log.r#type = "canonical",
                        http.method = %method,
                        http.path = %path,
                        http.latency_ms = latency_ms,
                        error.message = %err,
                        "リクエスト処理エラー"
                    );
                }
            }

            result
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        convert::Infallible,
        sync::{Arc, Mutex},
    };

    use tracing_subscriber::layer::SubscriberExt;

    use super::*;

    // テスト用のダミー Service
    #[derive(Clone)]
    struct DummyService {
        status: http::StatusCode,
    }

    impl Service<Request<()>> for DummyService {
        type Error = Infallible;
        type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
        type Response = Response<()>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _req: Request<()>) -> Self::Future {
            let status = self.status;
            Box::pin(async move { Ok(Response::builder().status(status).body(()).unwrap()) })
        }
    }

    // テスト用のエラーを返す Service
    #[derive(Clone)]
    struct ErrorService;

    impl Service<Request<()>> for ErrorService {
        type Error = String;
        type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
        type Response = Response<()>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _req: Request<()>) -> Self::Future {
            Box::pin(async { Err("internal service error".to_string()) })
        }
    }

    /// テスト用にログイベントをキャプチャする Layer
    #[derive(Clone)]
    struct CaptureLayer {
        events: Arc<Mutex<Vec<CapturedEvent>>>,
    }

    #[derive(Debug, Clone)]
    struct CapturedEvent {
        level:   tracing::Level,
        message: String,
        fields:  Vec<(String, String)>,
    }

    impl CapturedEvent {
        fn field(&self, name: &str) -> Option<&str> {
            self.fields
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        }
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for CaptureLayer {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            let mut visitor = FieldVisitor::default();
            event.record(&mut visitor);

            let captured = CapturedEvent {
                level:   *event.metadata().level(),
                message: visitor.message.unwrap_or_default(),
                fields:  visitor.fields,
            };

            self.events.lock().unwrap().push(captured);
        }
    }

    #[derive(Default)]
    struct FieldVisitor {
        message: Option<String>,
        fields:  Vec<(String, String)>,
    }

    impl tracing::field::Visit for FieldVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.message = Some(format!("{value:?}"));
            } else {
                self.fields
                    .push((field.name().to_string(), format!("{value:?}")));
            }
        }

        fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }

        fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
            if field.name() == "message" {
                self.message = Some(value.to_string());
            } else {
                self.fields
                    .push((field.name().to_string(), value.to_string()));
            }
        }
    }

    /// テスト用にキャプチャ subscriber をセットアップする
    ///
    /// 返り値の `DefaultGuard` はスコープに保持すること（ドロップでリセット）。
    fn setup_capture() -> (
        tracing::subscriber::DefaultGuard,
        Arc<Mutex<Vec<CapturedEvent>>>,
    ) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let capture = CaptureLayer {
            events: events.clone(),
        };
        let subscriber = tracing_subscriber::registry().with(capture);
        let guard = tracing::subscriber::set_default(subscriber);
        (guard, events)
    }

    fn build_request(method: &str, path: &str) -> Request<()> {
        Request::builder()
            .method(method)
            .uri(path)
            .body(())
            .unwrap()
    }

    // ===== is_health_check_path テスト =====

    #[test]
    fn test_is_health_check_path_healthでtrueを返す() {
        assert!(is_health_check_path("/health"));
    }

    #[test]
    fn test_is_health_check_path_送信エンドポイントでfalseを返す() {
        assert!(!is_health_check_path("/send-order-emails"));
    }

    // ===== CanonicalLogLineService テスト =====

    #[tokio::test]
    async fn test_正常リクエストでinfoレベルの1行が出力される() {
        let (_guard, events) = setup_capture();

        let mut sut = CanonicalLogLineLayer.layer(DummyService {
            status: http::StatusCode::OK,
        });

        let response = sut
            .call(build_request("POST", "/send-order-emails"))
            .await
            .unwrap();
        assert_eq!(response.status(), http::StatusCode::OK);

        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 1, "1つのログイベントが出力されること");
        assert_eq!(captured[0].level, tracing::Level::INFO);
        assert_eq!(captured[0].message, "リクエスト完了");
        assert_eq!(captured[0].field("log.type"), Some("canonical"));
    }

    #[tokio::test]
    async fn test_メソッドとパスとステータスが含まれる() {
        let (_guard, events) = setup_capture();

        let mut sut = CanonicalLogLineLayer.layer(DummyService {
            status: http::StatusCode::BAD_REQUEST,
        });

        sut.call(build_request("POST", "/send-order-emails"))
            .await
            .unwrap();

        let captured = events.lock().unwrap();
        assert_eq!(captured[0].field("http.method"), Some("POST"));
        assert_eq!(captured[0].field("http.path"), Some("/send-order-emails"));
        assert_eq!(captured[0].field("http.status_code"), Some("400"));
        assert!(captured[0].field("http.latency_ms").is_some());
    }

    #[tokio::test]
    async fn test_5xxレスポンスはwarnレベルで出力される() {
        let (_guard, events) = setup_capture();

        let mut sut = CanonicalLogLineLayer.layer(DummyService {
            status: http::StatusCode::INTERNAL_SERVER_ERROR,
        });

        sut.call(build_request("POST", "/send-order-emails"))
            .await
            .unwrap();

        let captured = events.lock().unwrap();
        assert_eq!(captured[0].level, tracing::Level::WARN);
        assert_eq!(captured[0].field("http.status_code"), Some("500"));
    }

    #[tokio::test]
    async fn test_healthパスではcanonical_log_lineが出力されない() {
        let (_guard, events) = setup_capture();

        let mut sut = CanonicalLogLineLayer.layer(DummyService {
            status: http::StatusCode::OK,
        });

        sut.call(build_request("GET", "/health")).await.unwrap();

        let captured = events.lock().unwrap();
        assert!(
            captured.is_empty(),
            "ヘルスチェックではログが出力されないこと"
        );
    }

    #[tokio::test]
    async fn test_serviceエラー時にerrorレベルで出力される() {
        let (_guard, events) = setup_capture();

        let mut sut = CanonicalLogLineLayer.layer(ErrorService);

        let result = sut.call(build_request("POST", "/send-order-emails")).await;
        assert!(result.is_err());

        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].level, tracing::Level::ERROR);
        assert_eq!(captured[0].message, "リクエスト処理エラー");
    }
}
