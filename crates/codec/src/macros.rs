/// Implement [`WireValue`](crate::WireValue) for model types through their
/// codec tables.
///
/// ```ignore
/// wire_value!(object AutoScalingPolicy, AddRemoveReplicaScalingMechanism);
/// wire_value!(union AutoScalingMechanism);
/// ```
#[macro_export]
macro_rules! wire_value {
    (object $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::WireValue for $ty {
                fn read(
                    reader: &mut $crate::JsonReader<'_>,
                    options: &$crate::CodecOptions,
                ) -> ::core::result::Result<Self, $crate::CodecError> {
                    <$ty as $crate::ObjectModel>::codec().decode(reader, options)
                }

                fn write(
                    &self,
                    writer: &mut $crate::JsonWriter,
                    options: &$crate::CodecOptions,
                ) -> ::core::result::Result<(), $crate::CodecError> {
                    <$ty as $crate::ObjectModel>::codec().encode(self, writer, options)
                }
            }
        )+
    };
    (union $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::WireValue for $ty {
                fn read(
                    reader: &mut $crate::JsonReader<'_>,
                    options: &$crate::CodecOptions,
                ) -> ::core::result::Result<Self, $crate::CodecError> {
                    <$ty as $crate::UnionModel>::codec().decode(reader, options)
                }

                fn write(
                    &self,
                    writer: &mut $crate::JsonWriter,
                    options: &$crate::CodecOptions,
                ) -> ::core::result::Result<(), $crate::CodecError> {
                    <$ty as $crate::UnionModel>::codec().encode(self, writer, options)
                }
            }
        )+
    };
}
