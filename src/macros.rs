#[macro_export]
macro_rules! make_smart_pointer {
    // read-only view for generic containers; mutation goes through the container's own API
    ($name:ident<$t:ident>, $target:ty => $field:ident) => {
        impl<$t> std::ops::Deref for $name<$t> {
            type Target = $target;
            fn deref(&self) -> &Self::Target {
                &self.$field
            }
        }
    };
}

/// Reads `TTLQ_<NAME>` environment variables into local bindings, falling back to the given
/// default when the variable is missing or fails to parse.
#[macro_export]
macro_rules! env_var {
    (
        defaults: {
            $($name:ident : $type:ty = $default:expr),* $(,)?
        }
    ) => {
        $(
            let $name: $type = {
                let var = concat!("TTLQ_", stringify!($name)).to_uppercase();
                match std::env::var(&var) {
                    Ok(raw) => raw.parse::<$type>().unwrap_or_else(|_| {
                        tracing::warn!(%var, %raw, "Malformed value, falling back to default");
                        $default
                    }),
                    Err(_) => $default,
                }
            };
        )*
    };
}
