//! Optional odometry backends for the logger's pose getter.
//!
//! Each backend adapts one third-party chassis library to [`PoseSource`] and
//! only exists when its cargo feature is enabled. At most one backend may be
//! enabled per build:
//!
//! - `ez-template`: `ez_template::set_odom` over an `ez_template::EzDrive`
//! - `lemlib`: `lemlib::set_odom` over a `lemlib::LemChassis`
//!
//! The selected backend's installer is re-exported here as `set_odom`.
//!
//! [`PoseSource`]: crate::utils::logger::PoseSource

extern crate alloc;

#[cfg(feature = "ez-template")]
pub mod ez_template;
#[cfg(feature = "lemlib")]
pub mod lemlib;

#[cfg(all(feature = "ez-template", feature = "lemlib"))]
compile_error!(
    "more than one Logger/Optional backend selected: features `ez-template` and `lemlib` are mutually exclusive"
);

/// Mark the enclosing module as having claimed the odometry backend slot.
///
/// Expands to a fixed-name item, so a second use in the same module fails to
/// compile with a duplicate definition.
///
/// ```
/// mod odom {
///     mvlib_core::declare_backend_usage!();
/// }
/// ```
///
/// ```compile_fail
/// mod odom {
///     mvlib_core::declare_backend_usage!();
///     mvlib_core::declare_backend_usage!();
/// }
/// ```
#[macro_export]
macro_rules! declare_backend_usage {
    () => {
        #[doc(hidden)]
        const _MVLIB_OPTIONAL_USED: () = ();
    };
}

#[cfg(feature = "ez-template")]
crate::declare_backend_usage!();
#[cfg(feature = "lemlib")]
crate::declare_backend_usage!();

#[cfg(all(feature = "ez-template", not(feature = "lemlib")))]
pub use ez_template::{set_odom, EzTemplateOdom as SelectedOdom};
#[cfg(all(feature = "lemlib", not(feature = "ez-template")))]
pub use lemlib::{set_odom, LemLibOdom as SelectedOdom};

/// Odometry backend libraries MVLib can read pose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    EzTemplate,
    LemLib,
}

impl Backend {
    pub const fn name(self) -> &'static str {
        match self {
            Backend::EzTemplate => "EZ-Template",
            Backend::LemLib => "LemLib",
        }
    }
}

/// Backend selected for this build, fixed by cargo features.
pub const SELECTED_BACKEND: Option<Backend> = if cfg!(feature = "ez-template") {
    Some(Backend::EzTemplate)
} else if cfg!(feature = "lemlib") {
    Some(Backend::LemLib)
} else {
    None
};

/// Non-owning access to a chassis object that may be absent at sample time.
///
/// `None` models a null handle; a `Weak` reports absent once the owner has
/// dropped the chassis.
pub trait ChassisRef {
    type Chassis: ?Sized;

    /// Run `f` on the chassis if it is present.
    fn with_chassis<R>(
        &self,
        f: impl FnOnce(&Self::Chassis) -> R,
    ) -> Option<R>;
}

impl<T: ?Sized> ChassisRef for &T {
    type Chassis = T;

    fn with_chassis<R>(
        &self,
        f: impl FnOnce(&T) -> R,
    ) -> Option<R> {
        Some(f(*self))
    }
}

impl<H: ChassisRef> ChassisRef for Option<H> {
    type Chassis = H::Chassis;

    fn with_chassis<R>(
        &self,
        f: impl FnOnce(&H::Chassis) -> R,
    ) -> Option<R> {
        self.as_ref()?.with_chassis(f)
    }
}

impl<T: ?Sized> ChassisRef for alloc::rc::Weak<T> {
    type Chassis = T;

    fn with_chassis<R>(
        &self,
        f: impl FnOnce(&T) -> R,
    ) -> Option<R> {
        self.upgrade().map(|chassis| f(&*chassis))
    }
}

#[cfg(target_has_atomic = "ptr")]
impl<T: ?Sized> ChassisRef for alloc::sync::Weak<T> {
    type Chassis = T;

    fn with_chassis<R>(
        &self,
        f: impl FnOnce(&T) -> R,
    ) -> Option<R> {
        self.upgrade().map(|chassis| f(&*chassis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{rc::Rc, sync::Arc};

    #[test]
    fn test_selected_backend_matches_features() {
        #[cfg(feature = "ez-template")]
        assert_eq!(SELECTED_BACKEND, Some(Backend::EzTemplate));
        #[cfg(feature = "lemlib")]
        assert_eq!(SELECTED_BACKEND, Some(Backend::LemLib));
        #[cfg(not(any(feature = "ez-template", feature = "lemlib")))]
        assert_eq!(SELECTED_BACKEND, None);
    }

    #[test]
    fn test_option_handle() {
        let value = 7u8;
        assert_eq!(Some(&value).with_chassis(|v| *v), Some(7));
        assert_eq!(None::<&u8>.with_chassis(|v| *v), None);
    }

    #[test]
    fn test_weak_handles_go_absent() {
        let owner = Rc::new(3u8);
        let weak = Rc::downgrade(&owner);
        assert_eq!(weak.with_chassis(|v| *v), Some(3));
        drop(owner);
        assert_eq!(weak.with_chassis(|v| *v), None);

        let owner = Arc::new(4u8);
        let weak = Arc::downgrade(&owner);
        assert_eq!(weak.with_chassis(|v| *v), Some(4));
        drop(owner);
        assert_eq!(weak.with_chassis(|v| *v), None);
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(Backend::EzTemplate.name(), "EZ-Template");
        assert_eq!(Backend::LemLib.name(), "LemLib");
    }
}
