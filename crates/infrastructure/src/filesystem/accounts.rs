use std::ffi::CString;

const INITIAL_BUFFER: usize = 16 * 1024;
const MAX_BUFFER: usize = 1024 * 1024;

/// Resolves a user name (or a numeric uid) to a uid.
pub fn resolve_user(name: &str) -> Option<u32> {
    if let Ok(uid) = name.parse::<u32>() {
        return Some(uid);
    }
    let c_name = CString::new(name).ok()?;
    let mut buf: Vec<libc::c_char> = vec![0; INITIAL_BUFFER];

    loop {
        // SAFETY: all pointers reference live, correctly sized locals for the
        // duration of the call; `result` is only read after it returns.
        let mut entry: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = std::ptr::null_mut();
        let rc = unsafe {
            libc::getpwnam_r(
                c_name.as_ptr(),
                &mut entry,
                buf.as_mut_ptr(),
                buf.len(),
                &mut result,
            )
        };

        if rc == libc::ERANGE && buf.len() < MAX_BUFFER {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || result.is_null() {
            return None;
        }
        return Some(entry.pw_uid);
    }
}

/// Resolves a group name (or a numeric gid) to a gid.
pub fn resolve_group(name: &str) -> Option<u32> {
    if let Ok(gid) = name.parse::<u32>() {
        return Some(gid);
    }
    let c_name = CString::new(name).ok()?;
    let mut buf: Vec<libc::c_char> = vec![0; INITIAL_BUFFER];

    loop {
        // SAFETY: as in `resolve_user`.
        let mut entry: libc::group = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::group = std::ptr::null_mut();
        let rc = unsafe {
            libc::getgrnam_r(
                c_name.as_ptr(),
                &mut entry,
                buf.as_mut_ptr(),
                buf.len(),
                &mut result,
            )
        };

        if rc == libc::ERANGE && buf.len() < MAX_BUFFER {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || result.is_null() {
            return None;
        }
        return Some(entry.gr_gid);
    }
}
