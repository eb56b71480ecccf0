//! Advisory status messages while a remote call is pending

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Pending-status text published to subscribers
pub type StatusSender = watch::Sender<Option<String>>;

/// Messages shown at fixed elapsed-time milestones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSchedule {
    milestones: Vec<(Duration, String)>,
}

impl ProgressSchedule {
    /// Build from `(seconds, message)` pairs; they are sorted by time
    pub fn new<I, S>(milestones: I) -> Self
    where
        I: IntoIterator<Item = (u64, S)>,
        S: Into<String>,
    {
        let mut milestones: Vec<(Duration, String)> = milestones
            .into_iter()
            .map(|(secs, message)| (Duration::from_secs(secs), message.into()))
            .collect();
        milestones.sort_by_key(|(at, _)| *at);
        Self { milestones }
    }

    /// Schedule used while outpainting
    pub fn outpaint() -> Self {
        Self::new([
            (0, "Preparing your panorama..."),
            (5, "Sending the template to the model..."),
            (15, "Painting the missing edges..."),
            (30, "Adding the finishing details..."),
            (60, "Still working, wide scenes can take a while..."),
        ])
    }

    /// Schedule used while enhancing
    pub fn enhance() -> Self {
        Self::new([
            (0, "Enhancing your image..."),
            (15, "Sharpening details..."),
            (30, "Almost there..."),
        ])
    }

    /// Schedule used while synthesizing a source picture
    pub fn source() -> Self {
        Self::new([
            (0, "Generating your image..."),
            (15, "Still generating..."),
        ])
    }

    pub fn milestones(&self) -> &[(Duration, String)] {
        &self.milestones
    }

    /// Message in effect after `elapsed`
    pub fn message_at(&self, elapsed: Duration) -> Option<&str> {
        self.milestones
            .iter()
            .take_while(|(at, _)| *at <= elapsed)
            .last()
            .map(|(_, message)| message.as_str())
    }
}

/// Drive `future` to completion, publishing milestone messages on `status`.
///
/// The status is left at the last published message; callers clear it.
pub async fn with_progress<F>(
    future: F,
    schedule: &ProgressSchedule,
    status: &StatusSender,
) -> F::Output
where
    F: Future,
{
    tokio::pin!(future);
    let start = Instant::now();

    for (at, message) in schedule.milestones() {
        let milestone = tokio::time::sleep_until(start + *at);
        tokio::select! {
            biased;
            output = &mut future => return output,
            _ = milestone => {
                status.send_replace(Some(message.clone()));
            }
        }
    }

    future.await
}
