use std::io;
use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Upper bound on flushing the output during close. A reader that stopped
/// draining (a paused pager) must not hold the run open.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// Output writer shared by the forwarding path and the separator path.
///
/// Each `write_all` holds the lock for exactly one chunk or one separator
/// line, so the two writers never interleave inside a write. Once closed,
/// every later write fails with `BrokenPipe`.
pub struct SharedSink {
    inner: Mutex<Option<Box<dyn AsyncWrite + Unpin + Send>>>,
}

impl SharedSink {
    pub fn new(wr: Box<dyn AsyncWrite + Unpin + Send>) -> Self {
        Self {
            inner: Mutex::new(Some(wr)),
        }
    }

    pub async fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        let mut guard = self.inner.lock().await;
        let Some(wr) = guard.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "output closed"));
        };
        wr.write_all(buf).await?;
        wr.flush().await
    }

    /// Flushes and shuts the writer down, giving up after `SHUTDOWN_GRACE`.
    /// The writer is dropped either way. Closing twice is a no-op.
    pub async fn close(&self) -> io::Result<()> {
        let taken = self.inner.lock().await.take();
        let Some(mut wr) = taken else {
            return Ok(());
        };
        match tokio::time::timeout(SHUTDOWN_GRACE, wr.shutdown()).await {
            Ok(res) => res,
            Err(_) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "output did not accept shutdown",
            )),
        }
    }

    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn close_is_idempotent_and_rejects_writes() {
        let (wr, mut rd) = tokio::io::duplex(64);
        let sink = SharedSink::new(Box::new(wr));

        sink.write_all(b"abc").await.unwrap();
        sink.close().await.unwrap();
        sink.close().await.unwrap();
        assert!(sink.is_closed().await);

        let err = sink.write_all(b"late").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        let mut got = Vec::new();
        rd.read_to_end(&mut got).await.unwrap();
        assert_eq!(got, b"abc");
    }

    /// Writer that never makes progress, like a pipe nobody drains.
    struct Stalled;

    impl AsyncWrite for Stalled {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Pending
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Pending
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Pending
        }
    }

    #[tokio::test(start_paused = true)]
    async fn close_gives_up_on_a_stalled_writer() {
        let sink = SharedSink::new(Box::new(Stalled));

        let err = sink.close().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
        assert!(sink.is_closed().await);
        assert!(sink.close().await.is_ok());
    }
}
