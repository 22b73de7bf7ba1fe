macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`Rule`](crate::Rule), filling in the table defaults.
///
/// Keys must appear in this order, each followed by a comma:
/// `name`, `push`, `reg`, `names`, `types`, then either `format` (a fixed
/// template) or `format_fn` (a template selector). Every key is optional.
///
/// ```
/// let rule = sdpform::rule! {
///     name: "ptime",
///     reg: r"ptime:(\d*(?:\.\d*)*)",
///     types: "d",
///     format: "ptime:%d",
/// };
/// assert_eq!(rule.label(), "ptime");
/// ```
#[macro_export]
macro_rules! rule {
    (@some) => { None };
    (@some $v:expr) => { Some($v) };
    (@or $d:expr) => { $d };
    (@or $d:expr, $v:expr) => { $v };
    (@template) => { $crate::Template::Fixed("%s") };
    (@template format $v:expr) => { $crate::Template::Fixed($v) };
    (@template format_fn $v:expr) => { $crate::Template::Select($v) };
    (
        $(name: $name:expr,)?
        $(push: $push:expr,)?
        $(reg: $reg:expr,)?
        $(names: [ $($field:expr),* $(,)? ],)?
        $(types: $types:expr,)?
        $(format: $fmt:expr,)?
        $(format_fn: $fmt_fn:expr,)?
    ) => {
        $crate::Rule {
            name: $crate::rule!(@some $($name)?),
            push: $crate::rule!(@some $($push)?),
            pattern: $crate::rule!(@or "(.*)" $(, $reg)?),
            names: &[ $($($field),*)? ],
            types: $crate::rule!(@or "" $(, $types)?),
            template: $crate::rule!(@template $(format $fmt)? $(format_fn $fmt_fn)?),
        }
    };
}
