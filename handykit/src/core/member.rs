//! Named member lookup for types that publish a member table.
//!
//! A type opts in by implementing [`Introspect`], returning a static table of
//! [`Member`] descriptors. Callers can then read a property or field by name
//! through [`get_property_value`] / [`get_field_value`] without knowing the
//! concrete type, since every `Introspect` type is also usable as
//! `&dyn Inspect`.
//!
//! Lookups are best-effort: an unknown name, a member filtered out by the
//! [`BindingFlags`], or a value of a different type all yield `None`.

use std::any::Any;

use bitflags::bitflags;

bitflags! {
    /// Selects which members a lookup considers.
    ///
    /// A member matches only if both its visibility (`PUBLIC`/`NON_PUBLIC`)
    /// and its level (`INSTANCE`/`STATIC`) are selected, so the empty set
    /// matches nothing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BindingFlags: u32 {
        const IGNORE_CASE = 1 << 0;
        const INSTANCE = 1 << 2;
        const STATIC = 1 << 3;
        const PUBLIC = 1 << 4;
        const NON_PUBLIC = 1 << 5;

        const DEFAULT = Self::PUBLIC.bits() | Self::INSTANCE.bits() | Self::STATIC.bits();
        const ALL = Self::PUBLIC.bits()
            | Self::NON_PUBLIC.bits()
            | Self::INSTANCE.bits()
            | Self::STATIC.bits();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// Computed accessor.
    Property,
    /// Stored data.
    Field,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    NonPublic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Read from the instance.
    Instance,
    /// Shared by every value of the type.
    Static,
}

/// Accessor returning the current value of a member.
pub type Getter<T> = fn(&T) -> Box<dyn Any>;

/// One entry of a type's member table.
pub struct Member<T> {
    pub name: &'static str,
    pub kind: MemberKind,
    pub visibility: Visibility,
    pub level: Level,
    pub get: Getter<T>,
}

impl<T> Member<T> {
    pub const fn property(name: &'static str, get: Getter<T>) -> Self {
        Self {
            name,
            kind: MemberKind::Property,
            visibility: Visibility::Public,
            level: Level::Instance,
            get,
        }
    }

    pub const fn field(name: &'static str, get: Getter<T>) -> Self {
        Self {
            name,
            kind: MemberKind::Field,
            visibility: Visibility::Public,
            level: Level::Instance,
            get,
        }
    }

    pub const fn non_public(mut self) -> Self {
        self.visibility = Visibility::NonPublic;
        self
    }

    pub const fn shared(mut self) -> Self {
        self.level = Level::Static;
        self
    }

    /// True if `flags` selects this member's visibility and level and `name`
    /// matches.
    pub fn matches(&self, name: &str, flags: BindingFlags) -> bool {
        let visibility = match self.visibility {
            Visibility::Public => BindingFlags::PUBLIC,
            Visibility::NonPublic => BindingFlags::NON_PUBLIC,
        };
        let level = match self.level {
            Level::Instance => BindingFlags::INSTANCE,
            Level::Static => BindingFlags::STATIC,
        };
        if !flags.contains(visibility | level) {
            return false;
        }
        if flags.contains(BindingFlags::IGNORE_CASE) {
            self.name.eq_ignore_ascii_case(name)
        } else {
            self.name == name
        }
    }
}

/// Types exposing a static member table.
pub trait Introspect: 'static {
    fn members() -> &'static [Member<Self>]
    where
        Self: Sized;
}

/// Object-safe lookup surface, implemented for every [`Introspect`] type.
pub trait Inspect {
    /// Read the first member of `kind` matching `name` under `flags`.
    fn read_member(&self, kind: MemberKind, name: &str, flags: BindingFlags)
    -> Option<Box<dyn Any>>;
}

impl<T: Introspect> Inspect for T {
    fn read_member(
        &self,
        kind: MemberKind,
        name: &str,
        flags: BindingFlags,
    ) -> Option<Box<dyn Any>> {
        T::members()
            .iter()
            .find(|member| member.kind == kind && member.matches(name, flags))
            .map(|member| (member.get)(self))
    }
}

/// Read a property by name, downcast to `V`.
///
/// Returns `None` if no property matches or its value is not a `V`.
pub fn get_property_value<V: 'static>(
    instance: &(impl Inspect + ?Sized),
    property_name: &str,
    flags: BindingFlags,
) -> Option<V> {
    read_as(instance, MemberKind::Property, property_name, flags)
}

/// Read a field by name, downcast to `V`.
///
/// Returns `None` if no field matches or its value is not a `V`.
pub fn get_field_value<V: 'static>(
    instance: &(impl Inspect + ?Sized),
    field_name: &str,
    flags: BindingFlags,
) -> Option<V> {
    read_as(instance, MemberKind::Field, field_name, flags)
}

fn read_as<V: 'static>(
    instance: &(impl Inspect + ?Sized),
    kind: MemberKind,
    name: &str,
    flags: BindingFlags,
) -> Option<V> {
    let value = instance.read_member(kind, name, flags)?;
    value.downcast::<V>().ok().map(|boxed| *boxed)
}
