use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("tailer failed: {0}")]
    Tailer(#[from] TailerError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
}

#[derive(Error, Debug)]
pub enum TailerError {
    #[error("already started")]
    AlreadyRunning,
    #[error("config error: {0}")]
    Config(String),
    #[error("stream io error: {stream} {source}")]
    StreamIo {
        stream: &'static str,
        source: std::io::Error,
    },
}

impl TailerError {
    pub(crate) fn input(source: std::io::Error) -> Self {
        Self::StreamIo {
            stream: "input",
            source,
        }
    }

    pub(crate) fn output(source: std::io::Error) -> Self {
        Self::StreamIo {
            stream: "output",
            source,
        }
    }
}
