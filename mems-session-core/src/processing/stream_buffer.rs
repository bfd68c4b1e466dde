use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver};

use crate::models::error::SessionError;
use crate::models::sample::{ChannelId, RawSample, Sample};
use crate::traits::clock::Clock;
use crate::traits::sensor_source::{SampleCallback, SensorSource, SubscriptionHandle};

/// Append-only buffer of timestamped readings for one sensor channel.
///
/// The source's callback stamps each reading with the wall clock at arrival
/// and pushes it onto an unbounded channel. `pump` moves pending readings into
/// the buffer, so the sample vector is only ever mutated by the thread that
/// owns the buffer.
///
/// There is no capacity bound: memory grows with session length times the
/// channel's delivery rate.
#[derive(Debug)]
pub struct SensorStreamBuffer {
    channel: ChannelId,
    samples: Vec<Sample>,
    receiver: Option<Receiver<Sample>>,
    subscription: Option<SubscriptionHandle>,
}

impl SensorStreamBuffer {
    pub fn new(channel: ChannelId) -> Self {
        Self {
            channel,
            samples: Vec::new(),
            receiver: None,
            subscription: None,
        }
    }

    /// Subscribe to `source`. Attaching an attached buffer does nothing.
    pub fn attach<S: SensorSource + ?Sized>(
        &mut self,
        source: &mut S,
        clock: Arc<dyn Clock>,
    ) -> Result<(), SessionError> {
        if self.subscription.is_some() {
            return Ok(());
        }

        let (sender, receiver) = unbounded();
        let channel = self.channel;
        let callback: SampleCallback = Arc::new(move |raw: RawSample| {
            let sample = Sample::stamped(raw, clock.wall());
            if sender.send(sample).is_err() {
                log::trace!("{} reading dropped after detach", channel);
            }
        });

        let handle = source.subscribe(callback)?;
        self.receiver = Some(receiver);
        self.subscription = Some(handle);
        log::debug!("{} buffer attached ({:?})", self.channel, handle);
        Ok(())
    }

    /// Append every reading delivered since the last pump. Returns how many were added.
    pub fn pump(&mut self) -> usize {
        let Some(receiver) = &self.receiver else {
            return 0;
        };
        let before = self.samples.len();
        self.samples.extend(receiver.try_iter());
        self.samples.len() - before
    }

    /// Unsubscribe from `source` and keep what already arrived.
    ///
    /// Idempotent. The buffer is read-only afterwards, even if the source
    /// reports an error while unsubscribing.
    pub fn detach<S: SensorSource + ?Sized>(&mut self, source: &mut S) -> Result<(), SessionError> {
        let Some(handle) = self.subscription.take() else {
            return Ok(());
        };
        let result = source.unsubscribe(handle);
        self.pump();
        self.receiver = None;
        log::debug!("{} buffer detached with {} samples", self.channel, self.samples.len());
        result
    }

    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }
}
