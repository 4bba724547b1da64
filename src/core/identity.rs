use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::CStr;

/// Maps numeric owner ids to display names. Lookups never fail: an id that
/// cannot be resolved is rendered as its decimal value.
pub trait IdentityLookup {
    fn user_name(&self, uid: u32) -> String;
    fn group_name(&self, gid: u32) -> String;
}

/// Resolves ids through the system passwd and group databases.
#[derive(Debug, Default)]
pub struct SystemIdentity;

const LOOKUP_BUFFER_START: usize = 1024;
const LOOKUP_BUFFER_MAX: usize = 1 << 20;

impl IdentityLookup for SystemIdentity {
    fn user_name(&self, uid: u32) -> String {
        lookup_user(uid).unwrap_or_else(|| {
            tracing::trace!(uid, "no passwd entry, using numeric id");
            uid.to_string()
        })
    }

    fn group_name(&self, gid: u32) -> String {
        lookup_group(gid).unwrap_or_else(|| {
            tracing::trace!(gid, "no group entry, using numeric id");
            gid.to_string()
        })
    }
}

fn lookup_user(uid: u32) -> Option<String> {
    let mut size = LOOKUP_BUFFER_START;
    loop {
        let mut buf = vec![0 as libc::c_char; size];
        let mut entry: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = std::ptr::null_mut();
        let rc = unsafe {
            libc::getpwuid_r(
                uid as libc::uid_t,
                &mut entry,
                buf.as_mut_ptr(),
                buf.len(),
                &mut result,
            )
        };
        if rc == libc::ERANGE && size < LOOKUP_BUFFER_MAX {
            size *= 2;
            continue;
        }
        if rc != 0 || result.is_null() || entry.pw_name.is_null() {
            return None;
        }
        let name = unsafe { CStr::from_ptr(entry.pw_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

fn lookup_group(gid: u32) -> Option<String> {
    let mut size = LOOKUP_BUFFER_START;
    loop {
        let mut buf = vec![0 as libc::c_char; size];
        let mut entry: libc::group = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::group = std::ptr::null_mut();
        let rc = unsafe {
            libc::getgrgid_r(
                gid as libc::gid_t,
                &mut entry,
                buf.as_mut_ptr(),
                buf.len(),
                &mut result,
            )
        };
        if rc == libc::ERANGE && size < LOOKUP_BUFFER_MAX {
            size *= 2;
            continue;
        }
        if rc != 0 || result.is_null() || entry.gr_name.is_null() {
            return None;
        }
        let name = unsafe { CStr::from_ptr(entry.gr_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

/// Memoises another lookup so a report resolves each id once.
pub struct CachedIdentity<L> {
    inner: L,
    users: RefCell<HashMap<u32, String>>,
    groups: RefCell<HashMap<u32, String>>,
}

impl<L: IdentityLookup> CachedIdentity<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            users: RefCell::new(HashMap::new()),
            groups: RefCell::new(HashMap::new()),
        }
    }
}

impl<L: IdentityLookup> IdentityLookup for CachedIdentity<L> {
    fn user_name(&self, uid: u32) -> String {
        self.users
            .borrow_mut()
            .entry(uid)
            .or_insert_with(|| self.inner.user_name(uid))
            .clone()
    }

    fn group_name(&self, gid: u32) -> String {
        self.groups
            .borrow_mut()
            .entry(gid)
            .or_insert_with(|| self.inner.group_name(gid))
            .clone()
    }
}

/// Fixed id-to-name table. Ids missing from the table fall back to their number.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    pub users: HashMap<u32, String>,
    pub groups: HashMap<u32, String>,
}

impl StaticIdentity {
    pub fn with_user(mut self, uid: u32, name: &str) -> Self {
        self.users.insert(uid, name.to_string());
        self
    }

    pub fn with_group(mut self, gid: u32, name: &str) -> Self {
        self.groups.insert(gid, name.to_string());
        self
    }
}

impl IdentityLookup for StaticIdentity {
    fn user_name(&self, uid: u32) -> String {
        self.users
            .get(&uid)
            .cloned()
            .unwrap_or_else(|| uid.to_string())
    }

    fn group_name(&self, gid: u32) -> String {
        self.groups
            .get(&gid)
            .cloned()
            .unwrap_or_else(|| gid.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct CountingLookup {
        calls: Cell<usize>,
    }

    impl IdentityLookup for CountingLookup {
        fn user_name(&self, uid: u32) -> String {
            self.calls.set(self.calls.get() + 1);
            format!("user{uid}")
        }

        fn group_name(&self, gid: u32) -> String {
            self.calls.set(self.calls.get() + 1);
            format!("group{gid}")
        }
    }

    #[test]
    fn static_lookup_falls_back_to_numeric_id() {
        let identity = StaticIdentity::default().with_user(1000, "alice");
        assert_eq!(identity.user_name(1000), "alice");
        assert_eq!(identity.user_name(4242), "4242");
        assert_eq!(identity.group_name(77), "77");
    }

    #[test]
    fn cached_lookup_resolves_each_id_once() {
        let cached = CachedIdentity::new(CountingLookup {
            calls: Cell::new(0),
        });
        assert_eq!(cached.user_name(5), "user5");
        assert_eq!(cached.user_name(5), "user5");
        assert_eq!(cached.group_name(5), "group5");
        assert_eq!(cached.inner.calls.get(), 2);
    }

    #[test]
    fn system_lookup_resolves_root() {
        assert_eq!(SystemIdentity.user_name(0), "root");
    }

    #[test]
    fn system_lookup_never_fails_for_unknown_ids() {
        let uid = u32::MAX - 7;
        assert_eq!(SystemIdentity.user_name(uid), uid.to_string());
    }
}
