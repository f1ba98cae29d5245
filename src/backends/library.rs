//! XInput DLL loading.
//!
//! Maps a library with `libloading` and resolves its entry points. `XInputGetState` and
//! `XInputSetState` are required; a library lacking either is rejected (and unloaded when the
//! `Library` drops). `XInputGetBatteryInformation` is optional, it is absent from
//! `xinput9_1_0.dll`.
//!
//! Most users should not interact with this module directly. Prefer
//! [`Loader::load`](crate::loader::Loader::load) or [`crate::load`].

use std::ffi::OsStr;

use libloading::{Library, Symbol};

use crate::backends::abi::{GetBatteryInformationFn, GetStateFn, SetStateFn};
use crate::backends::xinput::{XInputBackend, XInputFns};
use crate::error::LoadError;
use crate::loader::{Candidate, Target};

/// Map `target` and resolve the XInput entry points.
///
/// `target` is either an absolute path or a bare DLL name resolved by the OS search order.
pub fn open_library(target: &OsStr) -> Result<XInputBackend, LoadError> {
    let source = target.to_string_lossy().into_owned();

    // SAFETY: XInput DLLs have no initialisation routines with preconditions on the caller.
    let library = unsafe { Library::new(target)? };

    // SAFETY: the exported symbols have the documented XInput signatures.
    let fns = unsafe {
        let get_state: Symbol<GetStateFn> =
            library
                .get(b"XInputGetState\0")
                .map_err(|_| LoadError::MissingSymbol {
                    target: source.clone(),
                    symbol: "XInputGetState",
                })?;
        let set_state: Symbol<SetStateFn> =
            library
                .get(b"XInputSetState\0")
                .map_err(|_| LoadError::MissingSymbol {
                    target: source.clone(),
                    symbol: "XInputSetState",
                })?;
        let get_battery: Option<Symbol<GetBatteryInformationFn>> =
            library.get(b"XInputGetBatteryInformation\0").ok();

        XInputFns {
            get_state: *get_state,
            set_state: *set_state,
            get_battery_information: get_battery.map(|sym| *sym),
        }
    };

    tracing::debug!(
        library = %source,
        battery = fns.get_battery_information.is_some(),
        "resolved XInput entry points"
    );

    // SAFETY: `library` is moved into the backend, so the pointers stay valid while it lives.
    Ok(unsafe { XInputBackend::from_library(fns, source, library) })
}

/// Opener used by [`Loader::load`](crate::loader::Loader::load).
pub fn open(candidate: &Candidate) -> Result<XInputBackend, LoadError> {
    match &candidate.target {
        Target::Path(path) => open_library(path.as_os_str()),
        Target::Name(name) => open_library(OsStr::new(name)),
    }
}
