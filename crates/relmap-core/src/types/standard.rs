//! Built-in basic types, one instance per configuration

use std::sync::Arc;

use super::basic_registry::BasicTypeRegistry;
use super::basic_type::BasicTypeRef;
use super::binary::{BinaryType, WrapperBinaryType};
use super::character::{
    CharArrayType, CharacterArrayClobType, CharacterArrayNClobType, CharacterArrayType, StringType,
};
use super::domain_registry::DomainTypeRegistry;
use super::numeric::{BooleanType, DoubleType, IntegerType, LongType, UuidBinaryType, UuidCharType};
use super::sql_registry::SqlTypeRegistry;
use super::temporal::{DateType, InstantType, TimeType, TimestampType};
use crate::errors::Result;

/// The standard type singletons of one `TypeConfiguration`
///
/// Resolution rules that switch to a fixed variant (a temporal precision,
/// the nationalized character-array CLOB) hand out these instances. Once the
/// configuration is built every slot holds the registry's instance for its
/// descriptor pair; see [`StandardTypes::adopt_registered`].
#[derive(Debug, Clone)]
pub struct StandardTypes {
    pub boolean: BasicTypeRef,
    pub integer: BasicTypeRef,
    pub long: BasicTypeRef,
    pub double: BasicTypeRef,
    pub string: BasicTypeRef,
    pub characters: BasicTypeRef,
    pub wrapper_characters: BasicTypeRef,
    pub character_array_clob: BasicTypeRef,
    pub character_array_nclob: BasicTypeRef,
    pub binary: BasicTypeRef,
    pub wrapper_binary: BasicTypeRef,
    pub date: BasicTypeRef,
    pub time: BasicTypeRef,
    pub timestamp: BasicTypeRef,
    pub instant: BasicTypeRef,
    pub uuid_char: BasicTypeRef,
    pub uuid_binary: BasicTypeRef,
}

impl StandardTypes {
    /// Build every standard type from already-seeded descriptor registries
    ///
    /// # Errors
    ///
    /// `UnknownTypeCode` if an override removed a code a standard type needs.
    pub fn build(domain: &DomainTypeRegistry, sql: &SqlTypeRegistry) -> Result<Self> {
        Ok(Self {
            boolean: Arc::new(BooleanType::new(domain, sql)?),
            integer: Arc::new(IntegerType::new(domain, sql)?),
            long: Arc::new(LongType::new(domain, sql)?),
            double: Arc::new(DoubleType::new(domain, sql)?),
            string: Arc::new(StringType::new(domain, sql)?),
            characters: Arc::new(CharArrayType::new(domain, sql)?),
            wrapper_characters: Arc::new(CharacterArrayType::new(domain, sql)?),
            character_array_clob: Arc::new(CharacterArrayClobType::new(domain, sql)?),
            character_array_nclob: Arc::new(CharacterArrayNClobType::new(domain, sql)?),
            binary: Arc::new(BinaryType::new(domain, sql)?),
            wrapper_binary: Arc::new(WrapperBinaryType::new(domain, sql)?),
            date: Arc::new(DateType::new(domain, sql)?),
            time: Arc::new(TimeType::new(domain, sql)?),
            timestamp: Arc::new(TimestampType::new(domain, sql)?),
            instant: Arc::new(InstantType::new(domain, sql)?),
            uuid_char: Arc::new(UuidCharType::new(domain, sql)?),
            uuid_binary: Arc::new(UuidBinaryType::new(domain, sql)?),
        })
    }

    /// Replace each slot with the instance the registry holds for its pair
    ///
    /// A custom type registered for a standard pair, or an SQL override that
    /// folds two standard pairs together, displaces the built-in instance.
    pub fn adopt_registered(&self, registry: &BasicTypeRegistry) -> Self {
        let adopt = |slot: &BasicTypeRef| {
            let (domain, sql) = slot.descriptors().pair();
            registry
                .by_pair(domain, sql)
                .unwrap_or_else(|| Arc::clone(slot))
        };
        Self {
            boolean: adopt(&self.boolean),
            integer: adopt(&self.integer),
            long: adopt(&self.long),
            double: adopt(&self.double),
            string: adopt(&self.string),
            characters: adopt(&self.characters),
            wrapper_characters: adopt(&self.wrapper_characters),
            character_array_clob: adopt(&self.character_array_clob),
            character_array_nclob: adopt(&self.character_array_nclob),
            binary: adopt(&self.binary),
            wrapper_binary: adopt(&self.wrapper_binary),
            date: adopt(&self.date),
            time: adopt(&self.time),
            timestamp: adopt(&self.timestamp),
            instant: adopt(&self.instant),
            uuid_char: adopt(&self.uuid_char),
            uuid_binary: adopt(&self.uuid_binary),
        }
    }

    /// All singletons in registration order
    pub fn all(&self) -> Vec<BasicTypeRef> {
        [
            &self.boolean,
            &self.integer,
            &self.long,
            &self.double,
            &self.string,
            &self.characters,
            &self.wrapper_characters,
            &self.character_array_clob,
            &self.character_array_nclob,
            &self.binary,
            &self.wrapper_binary,
            &self.date,
            &self.time,
            &self.timestamp,
            &self.instant,
            &self.uuid_char,
            &self.uuid_binary,
        ]
        .into_iter()
        .cloned()
        .collect()
    }
}
