/// Creates a single [`Message`](crate::Message) from a role shorthand.
///
/// ```rust
/// use kestrel::{Role, kmsg};
///
/// let message = kmsg!(assistant => "Done.");
/// assert_eq!(message.role, Role::Assistant);
/// assert_eq!(message.content, "Done.");
/// ```
#[macro_export]
macro_rules! kmsg {
    (system => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::System, $content)
    };
    (user => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::User, $content)
    };
    (assistant => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::Assistant, $content)
    };
    ($role:ident => $content:expr $(,)?) => {
        compile_error!("unsupported role: use system, user, or assistant");
    };
}

/// Creates a `Vec<Message>` from role/content pairs, e.g. to seed session history.
///
/// ```rust
/// use kestrel::{Role, kmessages};
///
/// let messages = kmessages![
///     system => "You are concise.",
///     user => "What time is it?",
/// ];
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[1].role, Role::User);
/// ```
#[macro_export]
macro_rules! kmessages {
    () => {
        Vec::<$crate::Message>::new()
    };
    ($($role:ident => $content:expr),+ $(,)?) => {
        vec![$($crate::kmsg!($role => $content)),+]
    };
}

/// Declares a [`ToolSpec`](crate::ToolSpec) with typed parameters.
///
/// ```rust
/// use kestrel::{ParamType, ktool_spec};
///
/// let spec = ktool_spec!("add", "Adds two numbers", a: Float, b: Float);
/// assert_eq!(spec.params.get("b"), Some(ParamType::Float));
/// ```
#[macro_export]
macro_rules! ktool_spec {
    ($name:expr, $description:expr $(,)?) => {
        $crate::ToolSpec::new($name, $description)
    };
    ($name:expr, $description:expr, $($param:ident : $ty:ident),+ $(,)?) => {
        $crate::ToolSpec::new($name, $description)
            $(.param(stringify!($param), $crate::ParamType::$ty))+
    };
}
