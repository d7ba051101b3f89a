use std::{
    fmt,
    fmt::{Debug, Display},
};

const MASK: &str = "[hidden]";

/// A wrapper that keeps credentials out of debug output and logs. Both `Debug` and `Display`
/// print a mask; the inner value is only accessible via an explicit [`Secret::reveal`] call.
#[derive(Clone, Default)]
pub struct Secret<T>
where T: Clone + Default
{
    value: T,
}

impl<T: Clone + Default> Secret<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn reveal(&self) -> &T {
        &self.value
    }
}

impl<T: Clone + Default> Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T: Clone + Default> Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn secrets_never_leak_through_formatting() {
        let key = Secret::new("sk_live_abc123".to_string());
        assert_eq!(format!("{key}"), "[hidden]");
        assert_eq!(format!("{key:?}"), "[hidden]");
        assert_eq!(key.reveal(), "sk_live_abc123");
    }
}
