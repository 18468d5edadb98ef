//! Delivery fan-out
//!
//! Bridges the persist-then-notify flow: a message mutation is committed to
//! storage first, then the affected online parties are told. Offline parties
//! get nothing in realtime and catch up by fetching history.

use crate::events::{MessagesSeenPayload, NewGroupMessagePayload, ServerEvent};
use crate::routing::EventRouter;
use pulse_core::{GroupId, GroupStore, Message, UserId};
use std::sync::Arc;

/// Fans persisted message changes out to live connections
pub struct DeliveryFanout {
    router: Arc<EventRouter>,
    groups: Arc<dyn GroupStore>,
}

impl DeliveryFanout {
    /// Create a new fan-out layer
    pub fn new(router: Arc<EventRouter>, groups: Arc<dyn GroupStore>) -> Self {
        Self { router, groups }
    }

    /// Notify the affected parties of a newly persisted message
    ///
    /// Direct messages go to the receiver's connections. Group messages fan
    /// out to the membership as resolved right now, the sender's other
    /// devices included.
    pub async fn message_created(&self, message: &Message) {
        if let Some(group_id) = &message.group_id {
            let event = ServerEvent::NewGroupMessage(NewGroupMessagePayload {
                group_id: group_id.clone(),
                message: message.clone(),
            });
            self.fan_to_members(group_id, &event).await;
        } else if let Some(receiver) = &message.receiver_id {
            self.router
                .send_to_user(receiver, &ServerEvent::NewMessage(message.clone()))
                .await;
        }
    }

    /// Notify the counterparty that a message's text was edited
    pub async fn message_edited(&self, message: &Message, actor: &UserId) {
        self.message_updated(message, actor).await;
    }

    /// Notify the counterparty that a message's flags changed (star/pin/seen)
    pub async fn flags_changed(&self, message: &Message, actor: &UserId) {
        self.message_updated(message, actor).await;
    }

    /// Notify the counterparty that a message changed
    ///
    /// The actor already sees the change locally; only the other side of the
    /// conversation needs the push.
    pub async fn message_updated(&self, message: &Message, actor: &UserId) {
        let event = ServerEvent::MessageUpdated(message.clone());
        if let Some(group_id) = &message.group_id {
            self.fan_to_members(group_id, &event).await;
        } else if let Some(counterparty) = self.counterparty(message, actor) {
            self.router.send_to_user(&counterparty, &event).await;
        }
    }

    /// Notify the affected parties that a message was deleted
    pub async fn message_deleted(&self, message: &Message, actor: &UserId) {
        let event = ServerEvent::MessageDeleted(message.id.clone());
        if let Some(group_id) = &message.group_id {
            self.fan_to_members(group_id, &event).await;
        } else if let Some(counterparty) = self.counterparty(message, actor) {
            self.router.send_to_user(&counterparty, &event).await;
        }
    }

    /// Notify a sender that their messages were seen
    ///
    /// One event per seen batch regardless of how many messages it covered.
    pub async fn messages_seen(&self, seen_by: UserId, sender_id: UserId) {
        let event = ServerEvent::MessagesSeen(MessagesSeenPayload {
            seen_by,
            sender_id: sender_id.clone(),
        });
        self.router.send_to_user(&sender_id, &event).await;
    }

    /// The other side of a direct conversation, relative to the actor
    fn counterparty(&self, message: &Message, actor: &UserId) -> Option<UserId> {
        if &message.sender_id == actor {
            message.receiver_id.clone()
        } else {
            Some(message.sender_id.clone())
        }
    }

    /// Deliver to every member's subscribed connections, membership resolved
    /// now
    ///
    /// Members who joined after the message was sent still receive it, while
    /// a connection that left the group channel gets nothing. A failed
    /// membership lookup drops the fan-out with an error log rather than
    /// failing the committed mutation.
    async fn fan_to_members(&self, group_id: &GroupId, event: &ServerEvent) {
        let members = match self.groups.find_members(group_id).await {
            Ok(members) => members,
            Err(err) => {
                tracing::error!(group_id = %group_id, error = %err, "Membership lookup failed, dropping fan-out");
                return;
            }
        };

        for member in &members {
            self.router
                .send_to_user_in_group(member, group_id, event)
                .await;
        }
    }
}

impl std::fmt::Debug for DeliveryFanout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryFanout").finish_non_exhaustive()
    }
}
