//! Local stand-in for the SmartSupport backend.
//!
//! Serves the same `/api/*` routes as the real service with a built-in
//! knowledge base and keyword matching instead of the LLM pipeline.

mod feedback;
mod knowledge;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use clap::Parser;
use serde::Deserialize;
use serde_json::{Value, json};
use warp::Filter;
use warp::http::StatusCode;

use feedback::FeedbackStore;
use knowledge::Article;

const VERSION: &str = "2.2.0";
const TOP_K: usize = 3;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "SmartSupport mock backend")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// Answer every Nth ticket with a rate-limit error (0 disables)
    #[arg(long, default_value_t = 0)]
    rate_limit_every: u32,

    /// Start already initialized
    #[arg(long)]
    preinitialized: bool,
}

#[derive(Debug, Default)]
struct Backend {
    initialized: bool,
    tickets_seen: u32,
    rate_limit_every: u32,
    articles: Vec<Article>,
    feedback: FeedbackStore,
}

type Shared = Arc<Mutex<Backend>>;

#[derive(Debug, Deserialize)]
struct InitBody {
    #[serde(default)]
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct TicketBody {
    #[serde(default)]
    ticket_text: String,
}

#[derive(Debug, Deserialize)]
struct FeedbackBody {
    #[serde(default)]
    article_id: String,
    #[serde(default)]
    query: String,
    #[serde(default)]
    is_helpful: bool,
}

fn reply(status: StatusCode, body: Value) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(&body), status)
}

fn bad_request(message: &str) -> warp::reply::WithStatus<warp::reply::Json> {
    reply(StatusCode::BAD_REQUEST, json!({ "error": message }))
}

impl Backend {
    fn new(args: &Args) -> Self {
        Self {
            initialized: args.preinitialized,
            rate_limit_every: args.rate_limit_every,
            articles: knowledge::articles(),
            ..Self::default()
        }
    }

    fn init(&mut self, body: InitBody) -> warp::reply::WithStatus<warp::reply::Json> {
        if body.api_key.trim().is_empty() {
            return bad_request("API ключ не может быть пустым");
        }
        self.initialized = true;
        log::info!("initialized with {} articles", self.articles.len());
        reply(
            StatusCode::OK,
            json!({
                "success": true,
                "message": "Система успешно инициализирована",
                "articles_count": self.articles.len(),
            }),
        )
    }

    fn process_ticket(&mut self, body: TicketBody) -> warp::reply::WithStatus<warp::reply::Json> {
        if !self.initialized {
            return bad_request("Система не инициализирована. Введите API ключ.");
        }
        let text = body.ticket_text.trim();
        if text.is_empty() {
            return bad_request("Текст обращения не может быть пустым");
        }

        self.tickets_seen += 1;
        if self.rate_limit_every > 0 && self.tickets_seen % self.rate_limit_every == 0 {
            log::warn!("simulating rate limit on ticket #{}", self.tickets_seen);
            return reply(
                StatusCode::TOO_MANY_REQUESTS,
                json!({
                    "error": "rate_limit",
                    "message": "Превышен лимит запросов к API. Подождите минуту.",
                    "attempts": self.tickets_seen / self.rate_limit_every,
                    "retry_available": true,
                }),
            );
        }

        let results = self.search(text);
        reply(StatusCode::OK, self.ticket_payload(text, &results))
    }

    /// Top matches with the feedback bonus applied and re-ranked.
    fn search(&self, text: &str) -> Vec<Value> {
        let mut scored: Vec<(f64, f64, &Article)> = self
            .articles
            .iter()
            .map(|article| {
                let bonus = self.feedback.bonus(&article.feedback_id());
                let similarity = (knowledge::similarity(text, article) + bonus).min(1.0);
                (similarity, bonus, article)
            })
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        scored
            .into_iter()
            .take(TOP_K)
            .map(|(similarity, bonus, article)| {
                let article_id = article.feedback_id();
                json!({
                    "similarity": similarity,
                    "article": article,
                    "article_id": article_id,
                    "feedback_bonus": bonus,
                    "feedback_stats": self.feedback.stats(&article_id),
                })
            })
            .collect()
    }

    fn ticket_payload(&self, text: &str, results: &[Value]) -> Value {
        let best = self
            .articles
            .iter()
            .max_by(|a, b| {
                knowledge::similarity(text, a).total_cmp(&knowledge::similarity(text, b))
            });
        let (category, subcategory, priority, answer) = match best {
            Some(article) if knowledge::similarity(text, article) > 0.0 => (
                article.main_category,
                article.subcategory,
                article.priority,
                article.template_answer,
            ),
            _ => (
                "Прочее",
                "",
                "Обычный",
                "Спасибо за обращение! Мы уточним детали и вернёмся с ответом.",
            ),
        };
        let confidence = match results
            .first()
            .and_then(|r| r["similarity"].as_f64())
            .unwrap_or(0.0)
        {
            s if s >= 0.7 => "высокая",
            s if s >= 0.4 => "средняя",
            _ => "низкая",
        };
        let subcategories: Vec<&str> = subcategory
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        json!({
            "ticket_text": text,
            "classification": {
                "category": category,
                "confidence": confidence,
                "subcategories": subcategories,
                "subcategory": subcategory,
                "reasoning": "совпадение ключевых слов",
            },
            "key_info": {
                "main_issue": text.chars().take(80).collect::<String>(),
                "urgency": priority,
                "sentiment": "нейтральный",
            },
            "suggested_response": format!("Здравствуйте!\n\n{}\n\nС уважением, служба поддержки", answer),
            "confidence": confidence,
            "search_results": results,
            "normalized_text": text,
            "anglicism_changes": [],
            "timestamp": chrono::Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        })
    }

    fn feedback(&mut self, body: FeedbackBody) -> warp::reply::WithStatus<warp::reply::Json> {
        if body.article_id.is_empty() {
            return bad_request("article_id обязателен");
        }
        if body.query.is_empty() {
            return bad_request("query обязателен");
        }
        self.feedback
            .record(&body.article_id, &body.query, body.is_helpful);
        reply(
            StatusCode::OK,
            json!({
                "success": true,
                "message": "Спасибо за обратную связь!",
                "stats": self.feedback.summary(),
            }),
        )
    }
}

fn with_backend(
    backend: Shared,
) -> impl Filter<Extract = (Shared,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || backend.clone())
}

fn routes(
    backend: Shared,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let version = warp::path!("api" / "version")
        .and(warp::get())
        .map(|| warp::reply::json(&json!({ "version": VERSION })));

    let check_init = warp::path!("api" / "check_init")
        .and(warp::get())
        .and(with_backend(backend.clone()))
        .map(|backend: Shared| {
            let backend = backend.lock().unwrap_or_else(|e| e.into_inner());
            warp::reply::json(&json!({
                "initialized": backend.initialized,
                "articles_count": if backend.initialized { backend.articles.len() } else { 0 },
            }))
        });

    let init = warp::path!("api" / "init")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_backend(backend.clone()))
        .map(|body: InitBody, backend: Shared| {
            backend.lock().unwrap_or_else(|e| e.into_inner()).init(body)
        });

    let process_ticket = warp::path!("api" / "process_ticket")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_backend(backend.clone()))
        .map(|body: TicketBody, backend: Shared| {
            backend
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .process_ticket(body)
        });

    let feedback_stats = warp::path!("api" / "feedback" / "stats")
        .and(warp::get())
        .and(with_backend(backend.clone()))
        .map(|backend: Shared| {
            let backend = backend.lock().unwrap_or_else(|e| e.into_inner());
            warp::reply::json(&backend.feedback.summary())
        });

    let feedback = warp::path!("api" / "feedback")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_backend(backend))
        .map(|body: FeedbackBody, backend: Shared| {
            backend
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .feedback(body)
        });

    version
        .or(check_init)
        .or(init)
        .or(process_ticket)
        .or(feedback_stats)
        .or(feedback)
        .with(warp::log("mock_server"))
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let backend = Arc::new(Mutex::new(Backend::new(&args)));
    let addr: SocketAddr = ([127, 0, 0, 1], args.port).into();

    log::info!("SmartSupport mock backend listening on http://{}", addr);
    if args.rate_limit_every > 0 {
        log::info!("every {} ticket(s) will be rate limited", args.rate_limit_every);
    }

    warp::serve(routes(backend)).run(addr).await;
}
