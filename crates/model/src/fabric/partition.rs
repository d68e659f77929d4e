use std::sync::OnceLock;

use clusterapi_codec::{wire_value, NameMatch, ObjectCodec, ObjectModel, UnionCodec, UnionModel};
use uuid::Uuid;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SingletonPartitionInformation {
    pub id: Uuid,
}

impl SingletonPartitionInformation {
    pub const KIND: &'static str = "Singleton";
}

/// A partition owning the inclusive key range `low_key..=high_key`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Int64RangePartitionInformation {
    pub id: Uuid,
    pub low_key: i64,
    pub high_key: i64,
}

impl Int64RangePartitionInformation {
    pub const KIND: &'static str = "Int64Range";
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamedPartitionInformation {
    pub id: Uuid,
    pub name: String,
}

impl NamedPartitionInformation {
    pub const KIND: &'static str = "Named";
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartitionInformation {
    Singleton(SingletonPartitionInformation),
    Int64Range(Int64RangePartitionInformation),
    Named(NamedPartitionInformation),
}

impl PartitionInformation {
    pub fn id(&self) -> Uuid {
        match self {
            Self::Singleton(p) => p.id,
            Self::Int64Range(p) => p.id,
            Self::Named(p) => p.id,
        }
    }
}

impl ObjectModel for SingletonPartitionInformation {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<SingletonPartitionInformation>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("SingletonPartitionInformation", NameMatch::Ordinal)
                .tag("ServicePartitionKind", Self::KIND)
                .defaulted("Id", |p| &p.id)
                .build(|slots| {
                    Ok(SingletonPartitionInformation {
                        id: slots.take_or_default("Id")?,
                    })
                })
        })
    }
}

impl ObjectModel for Int64RangePartitionInformation {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<Int64RangePartitionInformation>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("Int64RangePartitionInformation", NameMatch::Ordinal)
                .tag("ServicePartitionKind", Self::KIND)
                .defaulted("Id", |p| &p.id)
                .defaulted("LowKey", |p| &p.low_key)
                .defaulted("HighKey", |p| &p.high_key)
                .build(|slots| {
                    Ok(Int64RangePartitionInformation {
                        id: slots.take_or_default("Id")?,
                        low_key: slots.take_or_default("LowKey")?,
                        high_key: slots.take_or_default("HighKey")?,
                    })
                })
        })
    }
}

impl ObjectModel for NamedPartitionInformation {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<NamedPartitionInformation>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("NamedPartitionInformation", NameMatch::Ordinal)
                .tag("ServicePartitionKind", Self::KIND)
                .defaulted("Id", |p| &p.id)
                .defaulted("Name", |p| &p.name)
                .build(|slots| {
                    Ok(NamedPartitionInformation {
                        id: slots.take_or_default("Id")?,
                        name: slots.take_or_default("Name")?,
                    })
                })
        })
    }
}

impl UnionModel for PartitionInformation {
    fn codec() -> &'static UnionCodec<Self> {
        static CODEC: OnceLock<UnionCodec<PartitionInformation>> = OnceLock::new();
        CODEC.get_or_init(|| {
            UnionCodec::<Self>::builder("PartitionInformation", "ServicePartitionKind", NameMatch::Ordinal)
                .variant(SingletonPartitionInformation::KIND, Self::Singleton, |p| match p {
                    Self::Singleton(inner) => Some(inner),
                    _ => None,
                })
                .variant(Int64RangePartitionInformation::KIND, Self::Int64Range, |p| match p {
                    Self::Int64Range(inner) => Some(inner),
                    _ => None,
                })
                .variant(NamedPartitionInformation::KIND, Self::Named, |p| match p {
                    Self::Named(inner) => Some(inner),
                    _ => None,
                })
                .build()
        })
    }

    fn tag(&self) -> &'static str {
        match self {
            Self::Singleton(_) => SingletonPartitionInformation::KIND,
            Self::Int64Range(_) => Int64RangePartitionInformation::KIND,
            Self::Named(_) => NamedPartitionInformation::KIND,
        }
    }
}

wire_value!(
    object SingletonPartitionInformation,
    Int64RangePartitionInformation,
    NamedPartitionInformation,
);
wire_value!(union PartitionInformation);
