use std::{collections::HashSet, hash::Hash};

// BeforeBroadcastAttempt

/// Raised by the transport layer on the sending entity before a broadcast
/// goes out. Handlers may cancel it or narrow the recipients.
#[derive(Clone, Debug)]
pub struct BeforeBroadcastAttempt<E: Copy + Eq + Hash> {
    recipients: Vec<E>,
    modified_recipients: Option<HashSet<E>>,
    cancelled: bool,
}

impl<E: Copy + Eq + Hash> BeforeBroadcastAttempt<E> {
    pub fn new(recipients: impl IntoIterator<Item = E>) -> Self {
        Self {
            recipients: recipients.into_iter().collect(),
            modified_recipients: None,
            cancelled: false,
        }
    }

    /// The candidate recipients as proposed by the transport layer
    pub fn recipients(&self) -> &[E] {
        &self.recipients
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn set_modified_recipients(&mut self, recipients: HashSet<E>) {
        self.modified_recipients = Some(recipients);
    }

    pub fn modified_recipients(&self) -> Option<&HashSet<E>> {
        self.modified_recipients.as_ref()
    }

    /// The recipients the packet will actually be delivered to
    pub fn effective_recipients(&self) -> HashSet<E> {
        if self.cancelled {
            return HashSet::new();
        }
        match &self.modified_recipients {
            Some(recipients) => recipients.clone(),
            None => self.recipients.iter().copied().collect(),
        }
    }
}

// BeforePacketSent

/// Raised on the receiving entity before a packet from `sender` is delivered
/// to it.
#[derive(Clone, Copy, Debug)]
pub struct BeforePacketSent<E: Copy> {
    sender: E,
    cancelled: bool,
}

impl<E: Copy> BeforePacketSent<E> {
    pub fn new(sender: E) -> Self {
        Self {
            sender,
            cancelled: false,
        }
    }

    pub fn sender(&self) -> E {
        self.sender
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
