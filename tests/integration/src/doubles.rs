//! In-memory store doubles
//!
//! Behave like the PostgreSQL stores for the flows the gateway exercises,
//! with everything held under a `parking_lot` mutex.

use async_trait::async_trait;
use parking_lot::Mutex;
use pulse_core::{
    CallRecord, CallStore, DomainError, Group, GroupId, GroupStore, Message, MessageFlags,
    MessageId, MessageStore, StoreResult, UserId, UserProfile, UserStore,
};

/// In-memory message store
#[derive(Default)]
pub struct MemoryMessageStore {
    messages: Mutex<Vec<Message>>,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored message, insertion order
    pub fn all(&self) -> Vec<Message> {
        self.messages.lock().clone()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn create_message(&self, message: Message) -> StoreResult<Message> {
        self.messages.lock().push(message.clone());
        Ok(message)
    }

    async fn find_message(&self, id: &MessageId) -> StoreResult<Option<Message>> {
        Ok(self.messages.lock().iter().find(|m| &m.id == id).cloned())
    }

    async fn find_between(&self, a: &UserId, b: &UserId) -> StoreResult<Vec<Message>> {
        Ok(self
            .messages
            .lock()
            .iter()
            .filter(|m| {
                (&m.sender_id == a && m.receiver_id.as_ref() == Some(b))
                    || (&m.sender_id == b && m.receiver_id.as_ref() == Some(a))
            })
            .cloned()
            .collect())
    }

    async fn update_flags(&self, id: &MessageId, flags: MessageFlags) -> StoreResult<Message> {
        let mut messages = self.messages.lock();
        let message = messages
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| DomainError::MessageNotFound(id.clone()))?;
        message.flags = flags;
        Ok(message.clone())
    }

    async fn update_text(&self, id: &MessageId, text: String) -> StoreResult<Message> {
        let mut messages = self.messages.lock();
        let message = messages
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| DomainError::MessageNotFound(id.clone()))?;
        message.text = Some(text);
        message.flags.edited = true;
        Ok(message.clone())
    }

    async fn delete_message(&self, id: &MessageId) -> StoreResult<()> {
        let mut messages = self.messages.lock();
        let before = messages.len();
        messages.retain(|m| &m.id != id);
        if messages.len() == before {
            return Err(DomainError::MessageNotFound(id.clone()));
        }
        Ok(())
    }

    async fn mark_seen_batch(&self, sender: &UserId, receiver: &UserId) -> StoreResult<u64> {
        let mut updated = 0;
        for message in self.messages.lock().iter_mut() {
            if &message.sender_id == sender
                && message.receiver_id.as_ref() == Some(receiver)
                && !message.flags.seen
            {
                message.flags.seen = true;
                updated += 1;
            }
        }
        Ok(updated)
    }
}

/// In-memory group store
#[derive(Default)]
pub struct MemoryGroupStore {
    groups: Mutex<Vec<Group>>,
}

impl MemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a group with the given members
    pub fn insert(&self, id: &str, members: &[&str]) {
        self.groups.lock().push(Group {
            id: GroupId::new(id),
            name: id.to_string(),
            members: members.iter().copied().map(UserId::new).collect(),
            admins: vec![],
            avatar: None,
            last_message_id: None,
        });
    }

    /// Replace a group's member set
    pub fn set_members(&self, id: &str, members: &[&str]) {
        let group_id = GroupId::new(id);
        if let Some(group) = self.groups.lock().iter_mut().find(|g| g.id == group_id) {
            group.members = members.iter().copied().map(UserId::new).collect();
        }
    }
}

#[async_trait]
impl GroupStore for MemoryGroupStore {
    async fn find_group(&self, id: &GroupId) -> StoreResult<Option<Group>> {
        Ok(self.groups.lock().iter().find(|g| &g.id == id).cloned())
    }

    async fn find_members(&self, id: &GroupId) -> StoreResult<Vec<UserId>> {
        self.groups
            .lock()
            .iter()
            .find(|g| &g.id == id)
            .map(|g| g.members.clone())
            .ok_or_else(|| DomainError::GroupNotFound(id.clone()))
    }

    async fn set_last_message(&self, id: &GroupId, message_id: &MessageId) -> StoreResult<()> {
        let mut groups = self.groups.lock();
        let group = groups
            .iter_mut()
            .find(|g| &g.id == id)
            .ok_or_else(|| DomainError::GroupNotFound(id.clone()))?;
        group.last_message_id = Some(message_id.clone());
        Ok(())
    }
}

/// In-memory call store
#[derive(Default)]
pub struct MemoryCallStore {
    records: Mutex<Vec<CallRecord>>,
}

impl MemoryCallStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored record, insertion order
    pub fn records(&self) -> Vec<CallRecord> {
        self.records.lock().clone()
    }
}

#[async_trait]
impl CallStore for MemoryCallStore {
    async fn create_record(&self, record: CallRecord) -> StoreResult<()> {
        self.records.lock().push(record);
        Ok(())
    }

    async fn history(&self, user_id: &UserId) -> StoreResult<Vec<CallRecord>> {
        let mut records: Vec<CallRecord> = self
            .records
            .lock()
            .iter()
            .filter(|r| &r.caller_id == user_id || &r.receiver_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(records)
    }
}

/// In-memory user store
#[derive(Default)]
pub struct MemoryUserStore {
    profiles: Mutex<Vec<UserProfile>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a profile
    pub fn insert(&self, profile: UserProfile) {
        self.profiles.lock().push(profile);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_profile(&self, id: &UserId) -> StoreResult<Option<UserProfile>> {
        Ok(self.profiles.lock().iter().find(|p| &p.id == id).cloned())
    }
}
