// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // Concatenate string-likes into one owned String.
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut out = ::std::string::String::from($first);
        $(
            out.push_str($rest);
        )+
        out
    }};
}

#[macro_export]
macro_rules! ms {
    // Milliseconds → Duration
    ($n:expr) => {
        ::std::time::Duration::from_millis($n)
    };
}
