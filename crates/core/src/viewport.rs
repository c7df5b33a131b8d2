//! Device classification by viewport width.
//!
//! Four fixed breakpoints (640/1024/1280/1536). [`device_type`] is the
//! one-shot query; [`ViewportTracker`] re-evaluates on every resize and
//! publishes changed flags to subscribers.

use serde::Serialize;
use tokio::sync::watch;

pub const BREAKPOINT_SM: u32 = 640;
pub const BREAKPOINT_MD: u32 = 1024;
pub const BREAKPOINT_LG: u32 = 1280;
pub const BREAKPOINT_XL: u32 = 1536;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
    LargeDesktop,
}

/// Active breakpoint band; each band starts at its named width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Base,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    pub fn from_width(width: u32) -> Self {
        match width {
            w if w >= BREAKPOINT_XL => Breakpoint::Xl,
            w if w >= BREAKPOINT_LG => Breakpoint::Lg,
            w if w >= BREAKPOINT_MD => Breakpoint::Md,
            w if w >= BREAKPOINT_SM => Breakpoint::Sm,
            _ => Breakpoint::Base,
        }
    }
}

pub fn device_type(width: u32) -> DeviceType {
    match width {
        w if w < BREAKPOINT_SM => DeviceType::Mobile,
        w if w < BREAKPOINT_MD => DeviceType::Tablet,
        w if w < BREAKPOINT_XL => DeviceType::Desktop,
        _ => DeviceType::LargeDesktop,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFlags {
    pub width: u32,
    pub is_mobile: bool,
    pub is_tablet: bool,
    pub is_desktop: bool,
    pub is_large_desktop: bool,
    pub breakpoint: Breakpoint,
}

impl DeviceFlags {
    pub fn from_width(width: u32) -> Self {
        let device = device_type(width);
        Self {
            width,
            is_mobile: device == DeviceType::Mobile,
            is_tablet: device == DeviceType::Tablet,
            is_desktop: device == DeviceType::Desktop,
            is_large_desktop: device == DeviceType::LargeDesktop,
            breakpoint: Breakpoint::from_width(width),
        }
    }

    pub fn device_type(&self) -> DeviceType {
        device_type(self.width)
    }

    /// Same classification, ignoring the raw width.
    fn same_class(&self, other: &DeviceFlags) -> bool {
        self.device_type() == other.device_type() && self.breakpoint == other.breakpoint
    }
}

/// Reactive viewport state.
pub struct ViewportTracker {
    tx: watch::Sender<DeviceFlags>,
}

impl ViewportTracker {
    pub fn new(initial_width: u32) -> Self {
        let (tx, _rx) = watch::channel(DeviceFlags::from_width(initial_width));
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<DeviceFlags> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> DeviceFlags {
        *self.tx.borrow()
    }

    /// Re-evaluate for a new width. Subscribers are notified only when the
    /// device type or breakpoint changes. Returns whether they were.
    pub fn resize(&self, width: u32) -> bool {
        let next = DeviceFlags::from_width(width);
        self.tx.send_if_modified(|flags| {
            let changed = !flags.same_class(&next);
            *flags = next;
            changed
        })
    }
}
