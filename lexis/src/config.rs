use clap::Parser;

/// The default address to listen on.
const DEFAULT_ADDRESS: &str = "0.0.0.0:3030";
/// The default directory for the fs document library.
const DEFAULT_DATA_PATH: &str = "library";
/// The interpreter backend used when a question does not name one.
const DEFAULT_PROVIDER: &str = "gemini";

#[derive(Debug, Parser)]
#[command(name = "lexis", version = "0.1", about = "Chat with legal documents", long_about = None)]
pub struct StartArgs {
    /// RUST_LOG string to use as the env filter.
    #[arg(short, long)]
    log: Option<String>,

    /// Address to listen on.
    #[arg(short, long)]
    address: Option<String>,

    /// Directory for the document library.
    #[arg(short, long)]
    data_path: Option<String>,

    /// CORS allowed origins.
    #[arg(long)]
    cors_allowed_origins: Option<String>,

    /// Interpreter backend to use when a question does not specify one.
    #[arg(long)]
    default_provider: Option<String>,

    /// Google Gemini API key; enables the `gemini` backend.
    #[arg(long)]
    gemini_api_key: Option<String>,

    /// Groq API key; enables the `groq` backend.
    #[arg(long)]
    groq_api_key: Option<String>,

    /// Ollama server URL; enables the `ollama` backend.
    #[arg(long)]
    ollama_url: Option<String>,
}

/// Implement a getter method on [StartArgs], using the `$var` environment variable as a fallback
/// and either default or return `None` if neither the argument nor the environment variable is set.
macro_rules! arg {
    ($id:ident, $var:literal, default $value:expr) => {
        impl StartArgs {
            pub fn $id(&self) -> String {
                match &self.$id {
                    Some(val) => val.to_string(),
                    None => match std::env::var($var) {
                        Ok(val) => val,
                        Err(_) => $value,
                    },
                }
            }
        }
    };
    ($id:ident, $var:literal, optional) => {
        impl StartArgs {
            pub fn $id(&self) -> Option<String> {
                match &self.$id {
                    Some(val) => Some(val.to_string()),
                    None => std::env::var($var).ok(),
                }
            }
        }
    };
}

arg!(log, "RUST_LOG", default "info".to_string());
arg!(address, "ADDRESS", default DEFAULT_ADDRESS.to_string());
arg!(data_path, "DATA_PATH", default DEFAULT_DATA_PATH.to_string());
arg!(default_provider, "DEFAULT_PROVIDER", default DEFAULT_PROVIDER.to_string());
arg!(gemini_api_key, "GEMINI_API_KEY", optional);
arg!(groq_api_key, "GROQ_API_KEY", optional);
arg!(ollama_url, "OLLAMA_URL", optional);

impl StartArgs {
    pub fn allowed_origins(&self) -> Vec<String> {
        let origins = match &self.cors_allowed_origins {
            Some(origins) => origins.to_string(),
            None => std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
        };

        origins
            .split(',')
            .filter_map(|o| (!o.is_empty()).then_some(String::from(o)))
            .collect()
    }
}
