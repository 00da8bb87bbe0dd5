use clap::Parser;
use std::net::SocketAddr;

/// Largest rate list the server will accept, in MiB.
pub const DEFAULT_MAX_UPLOAD_MB: usize = 16;

/// Command line options for the invoice web server.
#[derive(Parser, Debug, Clone)]
#[command(name = "website", version, about = "Fruzy web invoice generator")]
pub struct Config {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    /// Upload size cap in MiB
    #[arg(long = "max-upload-mb", default_value_t = DEFAULT_MAX_UPLOAD_MB)]
    pub max_upload_mb: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
        }
    }
}

impl Config {
    pub fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn body_limit(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}
