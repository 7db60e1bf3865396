//! Forwarding path: copies input into the shared sink and reports activity.
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::TailerError;

use super::sink::SharedSink;

/// Sending half of the activity channel.
///
/// The channel holds at most one pending signal; a signal sent while one is
/// already pending is dropped, since both only mean "reset the timer".
pub(crate) struct ActivityTx(mpsc::Sender<()>);

impl ActivityTx {
    pub(crate) fn notify(&self) {
        // Full means a reset is already queued; Closed means the monitor is gone.
        let _ = self.0.try_send(());
    }
}

pub(crate) fn activity_channel() -> (ActivityTx, mpsc::Receiver<()>) {
    let (tx, rx) = mpsc::channel(1);
    (ActivityTx(tx), rx)
}

/// Runs until end of stream, an I/O error, or `halt`.
///
/// Dropping `activity` on return closes the channel, which is how the
/// monitor learns that no more input will arrive.
pub(crate) async fn pump<R>(
    mut rd: R,
    sink: &SharedSink,
    activity: ActivityTx,
    halt: &CancellationToken,
) -> Result<u64, TailerError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; 16 * 1024];
    let mut total = 0u64;

    loop {
        let n = tokio::select! {
            biased;
            _ = halt.cancelled() => break,
            res = rd.read(&mut buf) => res.map_err(TailerError::input)?,
        };
        if n == 0 {
            tracing::debug!(bytes = total, "input reached end of stream");
            break;
        }

        tokio::select! {
            biased;
            _ = halt.cancelled() => break,
            res = sink.write_all(&buf[..n]) => res.map_err(TailerError::output)?,
        }
        total += n as u64;
        activity.notify();
    }

    drop(activity);
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn coalesces_pending_signals() {
        let (tx, mut rx) = activity_channel();
        tx.notify();
        tx.notify();
        tx.notify();
        assert_eq!(rx.recv().await, Some(()));
        assert!(rx.try_recv().is_err());
        drop(tx);
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn forwards_bytes_and_closes_channel_on_eof() {
        let (out_wr, mut out_rd) = tokio::io::duplex(1024);
        let sink = SharedSink::new(Box::new(out_wr));
        let (tx, mut rx) = activity_channel();
        let halt = CancellationToken::new();

        let (mut in_wr, in_rd) = tokio::io::duplex(1024);
        in_wr.write_all(b"hello world\n").await.unwrap();
        drop(in_wr);

        let total = pump(in_rd, &sink, tx, &halt).await.unwrap();
        assert_eq!(total, 12);
        assert_eq!(rx.recv().await, Some(()));
        assert_eq!(rx.recv().await, None);

        sink.close().await.unwrap();
        let mut got = Vec::new();
        out_rd.read_to_end(&mut got).await.unwrap();
        assert_eq!(got, b"hello world\n");
    }

    #[tokio::test]
    async fn halt_unblocks_a_pending_read() {
        let sink = SharedSink::new(Box::new(tokio::io::sink()));
        let (tx, _rx) = activity_channel();
        let halt = CancellationToken::new();
        let (_keep_open, in_rd) = tokio::io::duplex(16);

        halt.cancel();
        let total = pump(in_rd, &sink, tx, &halt).await.unwrap();
        assert_eq!(total, 0);
    }
}
