use crate::{
    core::{
        context::assemble,
        interpreter::Interpreter,
        model::ChatMessage,
        provider::InterpreterProvider,
        rank::Ranker,
        session::{
            Session, EMPTY_QUERY_REPLY, INTERPRETER_FAILURE_REPLY, NO_RELEVANT_SECTION_REPLY,
        },
    },
    err,
    error::LexisError,
};
use std::sync::Arc;
use tracing::debug;

/// Per-question orchestration: rank, assemble, interpret.
///
/// Local outcomes (empty query, no relevant section) and interpreter
/// failures all end as a single model turn; the session is always ready
/// again afterwards.
pub struct ChatService {
    interpreters: Arc<InterpreterProvider>,
    ranker: Ranker,
}

impl ChatService {
    pub fn new(interpreters: Arc<InterpreterProvider>, ranker: Ranker) -> Self {
        Self {
            interpreters,
            ranker,
        }
    }

    pub fn interpreters(&self) -> &InterpreterProvider {
        &self.interpreters
    }

    /// Answer `question` against the session's active document.
    ///
    /// Appends the user turn and the resulting model turn to the session
    /// history and updates the active reference set. Errors only when the
    /// session is mid-answer or the provider is unknown; in both cases the
    /// session is left untouched.
    pub async fn ask(
        &self,
        session: &mut Session,
        provider: &str,
        question: String,
    ) -> Result<ChatMessage, LexisError> {
        if session.answering {
            return err!(Busy);
        }

        if session.document.is_none() {
            return err!(DoesNotExist, "Active document session");
        }

        // Resolve before mutating, an unknown provider must not eat the turn.
        let interpreter = self.interpreters.get_provider(provider)?;

        let mut flight = InFlight::begin(session, question.clone());

        let reply = self
            .answer(&mut *flight.session, interpreter.as_ref(), &question)
            .await;

        flight.finish(reply.clone());

        Ok(reply)
    }

    async fn answer(
        &self,
        session: &mut Session,
        interpreter: &(dyn Interpreter + Send + Sync),
        question: &str,
    ) -> ChatMessage {
        if self.ranker.tokens(question).is_empty() {
            return ChatMessage::model(EMPTY_QUERY_REPLY);
        }

        let ranked = self.ranker.rank(&session.chunks, question);

        let Some(assembled) = assemble(&ranked, &session.history) else {
            session.references.clear();
            return ChatMessage::model(NO_RELEVANT_SECTION_REPLY);
        };

        debug!(
            "Answering with {} section(s) via '{}'",
            ranked.len(),
            interpreter.id()
        );

        session.references = ranked.into_iter().cloned().collect();

        match interpreter
            .interpret(&assembled.context_block, question, &assembled.history)
            .await
        {
            Ok(answer) => ChatMessage::model(answer),
            Err(e) => {
                e.print();
                ChatMessage::model(INTERPRETER_FAILURE_REPLY)
            }
        }
    }
}

/// Marks the session as answering for as long as it lives.
///
/// Dropping the guard always clears the flag, and removes the pending user
/// turn when no reply was recorded, so a question cancelled mid-answer
/// leaves the session exactly as it was before submission.
struct InFlight<'a> {
    session: &'a mut Session,
    replied: bool,
}

impl<'a> InFlight<'a> {
    fn begin(session: &'a mut Session, question: String) -> Self {
        session.answering = true;
        session.history.push(ChatMessage::user(question));
        Self {
            session,
            replied: false,
        }
    }

    fn finish(mut self, reply: ChatMessage) {
        self.session.history.push(reply);
        self.replied = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.session.answering = false;
        if !self.replied {
            self.session.history.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{model::Chunk, session::library_greeting};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockInterpreter {
        calls: AtomicUsize,
        fail: bool,
    }

    impl MockInterpreter {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait::async_trait]
    impl Interpreter for MockInterpreter {
        fn id(&self) -> &'static str {
            "mock"
        }

        async fn interpret(
            &self,
            context: &str,
            _question: &str,
            _history: &[ChatMessage],
        ) -> Result<String, LexisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if self.fail {
                return crate::err!(InvalidProvider, "mock failure");
            }

            assert!(context.starts_with("CONTEXTO:"));

            Ok("resposta simplificada".to_string())
        }
    }

    struct HangingInterpreter {
        started: Arc<tokio::sync::Notify>,
    }

    #[async_trait::async_trait]
    impl Interpreter for HangingInterpreter {
        fn id(&self) -> &'static str {
            "hang"
        }

        async fn interpret(
            &self,
            _context: &str,
            _question: &str,
            _history: &[ChatMessage],
        ) -> Result<String, LexisError> {
            self.started.notify_one();
            std::future::pending().await
        }
    }

    fn service(mock: Arc<MockInterpreter>) -> ChatService {
        let mut interpreters = InterpreterProvider::default();
        interpreters.register("mock", mock);
        ChatService::new(Arc::new(interpreters), Ranker::default())
    }

    fn session() -> Session {
        let chunks = vec![
            Chunk::new(
                "chunk-artigo-0".to_string(),
                "Artigo 1.º Objeto".to_string(),
                "Artigo 1.º Objeto\nO presente diploma regula os prazos.".to_string(),
            ),
            Chunk::new(
                "chunk-artigo-1".to_string(),
                "Artigo 2.º Âmbito".to_string(),
                "Artigo 2.º Âmbito\nAplica-se a todo o território.".to_string(),
            ),
        ];

        let mut session = Session::default();
        session.open("lei.pdf", chunks, library_greeting("lei.pdf"));
        session
    }

    #[tokio::test]
    async fn happy_path_calls_interpreter_and_updates_session() {
        let mock = Arc::new(MockInterpreter::new(false));
        let service = service(mock.clone());
        let mut session = session();

        let reply = service
            .ask(&mut session, "mock", "Qual o prazo previsto?".to_string())
            .await
            .unwrap();

        assert_eq!("resposta simplificada", reply.content);
        assert_eq!(1, mock.calls.load(Ordering::SeqCst));

        // Greeting + question + answer.
        assert_eq!(3, session.history.len());
        assert!(!session.references.is_empty());
        assert!(!session.answering);
    }

    #[tokio::test]
    async fn empty_query_short_circuits() {
        let mock = Arc::new(MockInterpreter::new(false));
        let service = service(mock.clone());
        let mut session = session();

        let reply = service
            .ask(&mut session, "mock", "e a".to_string())
            .await
            .unwrap();

        assert_eq!(EMPTY_QUERY_REPLY, reply.content);
        assert_eq!(0, mock.calls.load(Ordering::SeqCst));
        assert!(!session.answering);
    }

    #[tokio::test]
    async fn no_relevant_section_short_circuits_and_clears_references() {
        let mock = Arc::new(MockInterpreter::new(false));
        let service = service(mock.clone());
        let mut session = session();
        session.references = session.chunks.clone();

        let reply = service
            .ask(&mut session, "mock", "fotossíntese marinha".to_string())
            .await
            .unwrap();

        assert_eq!(NO_RELEVANT_SECTION_REPLY, reply.content);
        assert_eq!(0, mock.calls.load(Ordering::SeqCst));
        assert!(session.references.is_empty());
    }

    #[tokio::test]
    async fn interpreter_failure_becomes_a_single_reply() {
        let mock = Arc::new(MockInterpreter::new(true));
        let service = service(mock.clone());
        let mut session = session();

        let reply = service
            .ask(&mut session, "mock", "Qual o prazo previsto?".to_string())
            .await
            .unwrap();

        assert_eq!(INTERPRETER_FAILURE_REPLY, reply.content);
        assert_eq!(1, mock.calls.load(Ordering::SeqCst));

        // References were already selected; the session is ready again.
        assert!(!session.references.is_empty());
        assert!(!session.answering);
    }

    #[tokio::test]
    async fn busy_session_rejects_questions() {
        let mock = Arc::new(MockInterpreter::new(false));
        let service = service(mock.clone());
        let mut session = session();
        session.answering = true;

        let result = service
            .ask(&mut session, "mock", "Qual o prazo?".to_string())
            .await;

        assert!(result.is_err());
        assert_eq!(0, mock.calls.load(Ordering::SeqCst));
        // The rejected question never entered the history.
        assert_eq!(1, session.history.len());
    }

    #[tokio::test]
    async fn unknown_provider_is_an_error() {
        let mock = Arc::new(MockInterpreter::new(false));
        let service = service(mock);
        let mut session = session();

        assert!(service
            .ask(&mut session, "nope", "Qual o prazo?".to_string())
            .await
            .is_err());
        assert_eq!(1, session.history.len());
    }

    #[tokio::test]
    async fn cancelled_answer_leaves_session_ready() {
        let started = Arc::new(tokio::sync::Notify::new());

        let mock = Arc::new(MockInterpreter::new(false));
        let mut interpreters = InterpreterProvider::default();
        interpreters.register("mock", mock);
        interpreters.register(
            "hang",
            Arc::new(HangingInterpreter {
                started: started.clone(),
            }),
        );

        let service = Arc::new(ChatService::new(Arc::new(interpreters), Ranker::default()));
        let session = Arc::new(tokio::sync::Mutex::new(session()));

        let task = tokio::spawn({
            let service = service.clone();
            let session = session.clone();
            async move {
                let mut session = session.lock().await;
                let _ = service
                    .ask(&mut session, "hang", "Qual o prazo previsto?".to_string())
                    .await;
            }
        });

        // Drop the in-flight question once it has reached the backend.
        started.notified().await;
        task.abort();
        let _ = task.await;

        let mut session = session.lock().await;

        assert!(!session.answering);
        // No dangling user turn, only the greeting.
        assert_eq!(1, session.history.len());

        let reply = service
            .ask(&mut session, "mock", "Qual o prazo previsto?".to_string())
            .await
            .unwrap();

        assert_eq!("resposta simplificada", reply.content);
    }

    #[tokio::test]
    async fn no_active_document_is_an_error() {
        let mock = Arc::new(MockInterpreter::new(false));
        let service = service(mock);
        let mut session = Session::default();

        assert!(service
            .ask(&mut session, "mock", "Qual o prazo?".to_string())
            .await
            .is_err());
    }
}
