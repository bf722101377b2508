use std::io::IsTerminal;

use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("failed to initialize tracing: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Install a compact stderr subscriber filtered by `RUST_LOG` (default `info`).
///
/// Stdout stays reserved for the demo output. Colour codes are only written
/// when stderr is a terminal.
pub fn init_tracing() -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let ansi = std::io::stderr().is_terminal();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer(std::io::stderr, ansi))
        .try_init()?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), ansi, "tracing initialized");
    Ok(())
}

fn fmt_layer<S, W>(writer: W, ansi: bool) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(ansi)
        .without_time()
        .with_writer(writer)
        .compact()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for SharedBuffer {
        type Writer = SharedBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_second_init_reports_error() {
        let _ = init_tracing();
        let err = init_tracing().unwrap_err();
        assert!(err.to_string().starts_with("failed to initialize tracing"));
    }

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let buffer = SharedBuffer::default();
        let subscriber = tracing_subscriber::registry().with(fmt_layer(buffer.clone(), false));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(person = "Alan", "accumulator");
        });

        let output = buffer.contents();
        assert!(output.contains("INFO"));
        assert!(output.contains("accumulator"));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_ansi_output_is_coloured() {
        let buffer = SharedBuffer::default();
        let subscriber = tracing_subscriber::registry().with(fmt_layer(buffer.clone(), true));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("combiner");
        });

        assert!(buffer.contents().contains('\x1b'));
    }
}
