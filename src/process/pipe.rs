use std::os::fd::OwnedFd;

/// Both ends of an anonymous pipe.
///
/// Each end is owned, so whichever side is not handed to a child closes as
/// soon as it goes out of scope. Both ends are close-on-exec; the standard
/// library clears the flag only on the copy it installs as a child's stdio.
#[derive(Debug)]
pub struct Pipe {
    pub read: OwnedFd,
    pub write: OwnedFd,
}

impl Pipe {
    #[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
    pub fn open() -> nix::Result<Self> {
        let (read, write) = nix::unistd::pipe2(nix::fcntl::OFlag::O_CLOEXEC)?;
        Ok(Self { read, write })
    }

    #[cfg(not(any(target_os = "linux", target_os = "android", target_os = "freebsd")))]
    pub fn open() -> nix::Result<Self> {
        use std::os::fd::AsRawFd;

        use nix::fcntl::{fcntl, FcntlArg, FdFlag};

        let (read, write) = nix::unistd::pipe()?;
        for fd in [&read, &write] {
            fcntl(fd.as_raw_fd(), FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC))?;
        }
        Ok(Self { read, write })
    }
}
