//! Mutual friend computation
//!
//! The session layer hands out a fresh `UserName` per login, so the same
//! person seen from two accounts shares no stable identifier. Contacts are
//! instead matched on what both accounts observe: nickname, province, city and
//! `AttrStatus`.

use indexmap::IndexMap;

use crate::chat::{Chats, Contact, FriendSource};

/// Equivalence key of a contact across accounts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactKey {
    pub nick_name: String,
    pub province: String,
    pub city: String,
    pub attr_status: Option<i64>,
}

impl ContactKey {
    /// Extract the key of a contact
    #[must_use]
    pub fn of(contact: &Contact) -> Self {
        Self {
            nick_name: contact.nick_name.clone(),
            province: contact.province.clone(),
            city: contact.city.clone(),
            attr_status: contact.attr_status(),
        }
    }
}

fn classes(contacts: &[Contact]) -> IndexMap<ContactKey, &Contact> {
    let mut map = IndexMap::with_capacity(contacts.len());
    for contact in contacts {
        map.entry(ContactKey::of(contact)).or_insert(contact);
    }
    map
}

/// Find the friends shared by every source
///
/// Contacts are compared by [`ContactKey`], so duplicates within one source
/// collapse as well. The first source decides which contact represents each
/// class and the order of the result. No sources yields an empty collection.
#[must_use]
pub fn mutual_friends(sources: &[&dyn FriendSource]) -> Chats {
    let Some((first, rest)) = sources.split_first() else {
        return Chats::default();
    };

    let mut mutual = classes(first.friends());
    for source in rest {
        let other = classes(source.friends());
        mutual.retain(|key, _| other.contains_key(key));
    }

    tracing::debug!(
        sources = sources.len(),
        mutual = mutual.len(),
        "computed mutual friends"
    );

    mutual.into_values().cloned().collect()
}
