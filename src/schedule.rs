use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Sample,
}

/// Interval ticker feeding sampling ticks through a channel.
///
/// The channel holds a single pending tick, so a slow cycle delays the next
/// one instead of queueing a burst behind it.
pub struct Ticker {
    rx: mpsc::Receiver<Tick>,
    task: tokio::task::JoinHandle<()>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<Tick>(1);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tx.send(Tick::Sample).await.is_err() {
                    break;
                }
            }
        });

        Self { rx, task }
    }

    pub async fn next(&mut self) -> Option<Tick> {
        self.rx.recv().await
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_tick_is_immediate_then_periodic() {
        let mut ticker = Ticker::new(Duration::from_secs(10));
        let start = tokio::time::Instant::now();

        assert_eq!(ticker.next().await, Some(Tick::Sample));
        assert!(start.elapsed() < Duration::from_secs(1));

        assert_eq!(ticker.next().await, Some(Tick::Sample));
        assert!(start.elapsed() >= Duration::from_secs(10));
    }
}
