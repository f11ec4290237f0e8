//! Option sources for list-based fields.
//!
//! Anything that can yield an ordered list of `(value, label)` pairs can
//! restrict a property's values: an explicit [`OptionList`], or any type
//! implementing [`OptionEnum`] through [`EnumOptions`].

use std::borrow::Cow;
use std::marker::PhantomData;

use crate::types::{OptionEntry, OptionList, OptionSlot};

/// Yields the ordered option list for a radio, checkbox or select field.
pub trait OptionSource {
    fn option_list(&self) -> OptionList;
}

impl OptionSource for OptionList {
    fn option_list(&self) -> OptionList {
        self.clone()
    }
}

impl OptionSource for Vec<OptionEntry> {
    fn option_list(&self) -> OptionList {
        self.iter().cloned().map(OptionSlot::Entry).collect()
    }
}

impl OptionSource for &[&str] {
    fn option_list(&self) -> OptionList {
        OptionList::from_values(self.iter().copied())
    }
}

impl<const N: usize> OptionSource for [&str; N] {
    fn option_list(&self) -> OptionList {
        OptionList::from_values(self.iter().copied())
    }
}

/// A finite, ordered set of values usable as options, typically a
/// fieldless enum.
///
/// ```
/// use std::borrow::Cow;
/// use formbind_fields::{EnumOptions, OptionEnum, OptionSource};
///
/// #[derive(Clone, Copy)]
/// enum Size { Small, Large }
///
/// impl OptionEnum for Size {
///     fn variants() -> &'static [Self] {
///         &[Size::Small, Size::Large]
///     }
///     fn value(&self) -> Cow<'static, str> {
///         match self {
///             Size::Small => "small".into(),
///             Size::Large => "large".into(),
///         }
///     }
/// }
///
/// let list = EnumOptions::<Size>::new().option_list();
/// assert!(list.contains("large"));
/// ```
pub trait OptionEnum: Sized + 'static {
    /// Every member in presentation order.
    fn variants() -> &'static [Self];

    /// String form used as option value and for selection comparisons.
    fn value(&self) -> Cow<'static, str>;

    /// Declared display label, if different from the value.
    fn label(&self) -> Option<Cow<'static, str>> {
        None
    }
}

/// Option source backed by an [`OptionEnum`] type.
pub struct EnumOptions<E>(PhantomData<fn() -> E>);

impl<E: OptionEnum> EnumOptions<E> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E: OptionEnum> Default for EnumOptions<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: OptionEnum> OptionSource for EnumOptions<E> {
    fn option_list(&self) -> OptionList {
        E::variants()
            .iter()
            .map(|member| {
                OptionSlot::Entry(OptionEntry {
                    value: member.value().into_owned(),
                    label: member.label().map(Cow::into_owned),
                })
            })
            .collect()
    }
}
