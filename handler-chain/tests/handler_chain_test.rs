//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: middleware before/after order, middleware before stopping the chain, Reply stopping the chain
//! and being passed to middleware after, Ignore/Continue falling through, and handler errors propagating.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{
    Chat, ChatKind, Handler, HandlerError, HandlerResponse, Message, Middleware, User,
};
use handler_chain::HandlerChain;

fn create_test_message(text: &str) -> Message {
    Message {
        id: 1,
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
            is_bot: false,
        },
        chat: Chat {
            id: 456,
            kind: ChatKind::Private,
        },
        text: Some(text.to_string()),
        reply_to: None,
        created_at: Utc::now(),
    }
}

/// **Test: Middleware before and after run once; handler runs once; response is Continue.**
#[tokio::test]
async fn test_handler_chain_with_middleware() {
    let before_count = Arc::new(AtomicUsize::new(0));
    let after_count = Arc::new(AtomicUsize::new(0));
    let handle_count = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_middleware(Arc::new(CountingMiddleware {
            before_count: before_count.clone(),
            after_count: after_count.clone(),
        }))
        .add_handler(Arc::new(CountingHandler {
            handle_count: handle_count.clone(),
            response: HandlerResponse::Continue,
        }));

    let result = chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(before_count.load(Ordering::SeqCst), 1);
    assert_eq!(handle_count.load(Ordering::SeqCst), 1);
    assert_eq!(after_count.load(Ordering::SeqCst), 1);
}

/// **Test: Middleware before returns false; chain answers Stop and no handler runs.**
#[tokio::test]
async fn test_middleware_stops_chain() {
    struct BlockingMiddleware;

    #[async_trait]
    impl Middleware for BlockingMiddleware {
        async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
            Ok(false)
        }
    }

    let handle_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_middleware(Arc::new(BlockingMiddleware))
        .add_handler(Arc::new(CountingHandler {
            handle_count: handle_count.clone(),
            response: HandlerResponse::Continue,
        }));

    let result = chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
}

/// **Test: First handler returning Reply ends the handle phase; later handlers are skipped; after sees the reply.**
#[tokio::test]
async fn test_reply_stops_chain_and_passes_to_after() {
    struct CaptureResponse {
        seen: Arc<Mutex<Option<HandlerResponse>>>,
    }

    #[async_trait]
    impl Middleware for CaptureResponse {
        async fn after(
            &self,
            _message: &Message,
            response: &HandlerResponse,
        ) -> dbot_core::Result<()> {
            *self.seen.lock().unwrap() = Some(response.clone());
            Ok(())
        }
    }

    let seen = Arc::new(Mutex::new(None));
    let skipped = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_middleware(Arc::new(CaptureResponse { seen: seen.clone() }))
        .add_handler(Arc::new(CountingHandler {
            handle_count: Arc::new(AtomicUsize::new(0)),
            response: HandlerResponse::Reply("help text".to_string()),
        }))
        .add_handler(Arc::new(CountingHandler {
            handle_count: skipped.clone(),
            response: HandlerResponse::Continue,
        }));

    let result = chain.handle(&create_test_message("/help")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("help text".to_string()));
    assert_eq!(skipped.load(Ordering::SeqCst), 0);
    assert_eq!(
        *seen.lock().unwrap(),
        Some(HandlerResponse::Reply("help text".to_string()))
    );
}

/// **Test: Ignore falls through to the next handler.**
#[tokio::test]
async fn test_ignore_falls_through() {
    let second = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(CountingHandler {
            handle_count: Arc::new(AtomicUsize::new(0)),
            response: HandlerResponse::Ignore,
        }))
        .add_handler(Arc::new(CountingHandler {
            handle_count: second.clone(),
            response: HandlerResponse::Stop,
        }));

    let result = chain.handle(&create_test_message("x")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

/// **Test: Multiple middleware run before in order (first, second), after in reverse (second, first).**
#[tokio::test]
async fn test_multiple_middleware_executed_in_order() {
    struct OrderMiddleware {
        name: &'static str,
        order: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Middleware for OrderMiddleware {
        async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
            self.order.lock().unwrap().push(format!("before_{}", self.name));
            Ok(true)
        }

        async fn after(
            &self,
            _message: &Message,
            _response: &HandlerResponse,
        ) -> dbot_core::Result<()> {
            self.order.lock().unwrap().push(format!("after_{}", self.name));
            Ok(())
        }
    }

    let order = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_middleware(Arc::new(OrderMiddleware {
            name: "first",
            order: order.clone(),
        }))
        .add_middleware(Arc::new(OrderMiddleware {
            name: "second",
            order: order.clone(),
        }));

    chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(
        *order.lock().unwrap(),
        vec!["before_first", "before_second", "after_second", "after_first"]
    );
}

/// **Test: A handler error is returned to the caller.**
#[tokio::test]
async fn test_handler_error_propagates() {
    struct FailingHandler;

    #[async_trait]
    impl Handler for FailingHandler {
        async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
            Err(HandlerError::State("boom".to_string()).into())
        }
    }

    let chain = HandlerChain::new().add_handler(Arc::new(FailingHandler));

    assert!(chain.handle(&create_test_message("x")).await.is_err());
}

// --- Helpers used by tests ---

struct CountingMiddleware {
    before_count: Arc<AtomicUsize>,
    after_count: Arc<AtomicUsize>,
}

#[async_trait]
impl Middleware for CountingMiddleware {
    async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
        self.before_count.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> dbot_core::Result<()> {
        self.after_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct CountingHandler {
    handle_count: Arc<AtomicUsize>,
    response: HandlerResponse,
}

#[async_trait]
impl Handler for CountingHandler {
    async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
        self.handle_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}
