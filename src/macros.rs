/// Declares one tree node over an existing binding.
///
/// The attribute name is the stringified identifier, or the literal
/// given after `as`. Scalar and slice kinds borrow mutably so the
/// deserializer can write through them; `str`, `bytes`, `object`, and
/// `array` borrow the declared storage shared.
///
/// ```rust
/// use stackjson::{field, serialize_to_string, Options};
///
/// let mut lu1 = 123u64;
/// let mut flag = true;
/// let tree = [
///     field!(unsigned lu1),
///     field!(bool flag as "b1"),
/// ];
/// let text = serialize_to_string(&tree, &Options::new()).unwrap();
/// assert_eq!(text, r#"{"lu1":123,"b1":true}"#);
/// ```
#[macro_export]
macro_rules! field {
    (signed $x:ident $(as $name:literal)?) => {
        $crate::Node::named(
            $crate::field!(@name $x $($name)?),
            $crate::Value::signed(&mut $x),
        )
    };
    (unsigned $x:ident $(as $name:literal)?) => {
        $crate::Node::named(
            $crate::field!(@name $x $($name)?),
            $crate::Value::unsigned(&mut $x),
        )
    };
    (bool $x:ident $(as $name:literal)?) => {
        $crate::Node::named(
            $crate::field!(@name $x $($name)?),
            $crate::Value::boolean(&mut $x),
        )
    };
    (signed_slice $x:ident $(as $name:literal)?) => {
        $crate::Node::named(
            $crate::field!(@name $x $($name)?),
            $crate::Value::signed_slice(&mut $x),
        )
    };
    (unsigned_slice $x:ident $(as $name:literal)?) => {
        $crate::Node::named(
            $crate::field!(@name $x $($name)?),
            $crate::Value::unsigned_slice(&mut $x),
        )
    };
    (bool_slice $x:ident $(as $name:literal)?) => {
        $crate::Node::named(
            $crate::field!(@name $x $($name)?),
            $crate::Value::bool_slice(&mut $x),
        )
    };
    (str $x:ident $(as $name:literal)?) => {
        $crate::Node::named(
            $crate::field!(@name $x $($name)?),
            $crate::Value::string(&$x),
        )
    };
    (bytes $x:ident $(as $name:literal)?) => {
        $crate::Node::named(
            $crate::field!(@name $x $($name)?),
            $crate::Value::bytes(&$x),
        )
    };
    (object $x:ident $(as $name:literal)?) => {
        $crate::Node::named(
            $crate::field!(@name $x $($name)?),
            $crate::Value::object(&$x),
        )
    };
    (array $x:ident $(as $name:literal)?) => {
        $crate::Node::named(
            $crate::field!(@name $x $($name)?),
            $crate::Value::array(&$x),
        )
    };
    // Name selection for the arms above.
    (@name $x:ident) => {
        stringify!($x)
    };
    (@name $x:ident $name:literal) => {
        $name
    };
}
