#[macro_export]
macro_rules! on_option {
    ( $e:expr, $err_exp:expr ) => {
        match $e {
            Some(x) => x,
            None => { $err_exp },
        }
    }
}

/// Unwrap value. Return ```Ok(x)``` or performs action on error
///
/// Example
/// ```
/// use xrinfo::on_error;
///
/// fn parse_vendor_id(raw: &str) -> Result<u32, &'static str> {
///     let id = on_error!(raw.parse::<u32>(), return Err("Not a vendor id"));
///
///     Ok(id)
/// }
///
/// assert_eq!(parse_vendor_id("42"), Ok(42));
/// assert!(parse_vendor_id("unknown").is_err());
/// ```
#[macro_export]
macro_rules! on_error {
    ( $e:expr, $err_exp:expr ) => {
        match $e {
            Ok(x) => x,
            Err(_) => { $err_exp },
        }
    }
}

#[macro_export]
macro_rules! on_error_ret {
    ( $e:expr, $err_exp:expr ) => {
        $crate::on_error!($e, return Err($err_exp))
    }
}
