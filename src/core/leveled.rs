//! Leveled entry points shared by [`Logger`](crate::Logger) and
//! [`LogHandle`](crate::LogHandle)
//!
//! Every generated method is `#[track_caller]`, so the `caller` key points at
//! user code rather than at the facade.

macro_rules! leveled_methods {
    ($($level:ident => $fields_fn:ident, $fmt_fn:ident;)+) => {
        $(
            #[doc = concat!(
                "Log `message` with structured `fields` at ",
                stringify!($level),
                " level"
            )]
            #[track_caller]
            pub fn $fields_fn(&self, message: impl Into<String>, fields: &[$crate::core::Field]) {
                $crate::core::handle::emit_fields(
                    self,
                    $crate::core::LogLevel::$level,
                    message.into(),
                    fields,
                    ::std::panic::Location::caller().into(),
                );
            }

            #[doc = concat!(
                "Log a `format_args!` message at ",
                stringify!($level),
                " level; formatting is skipped when no sink accepts it"
            )]
            #[track_caller]
            pub fn $fmt_fn(&self, args: ::std::fmt::Arguments<'_>) {
                $crate::core::handle::emit_args(
                    self,
                    $crate::core::LogLevel::$level,
                    args,
                    ::std::panic::Location::caller().into(),
                );
            }
        )+

        /// Log `message` with structured `fields` at `level`
        #[track_caller]
        pub fn log(
            &self,
            level: $crate::core::LogLevel,
            message: impl Into<String>,
            fields: &[$crate::core::Field],
        ) {
            $crate::core::handle::emit_fields(
                self,
                level,
                message.into(),
                fields,
                ::std::panic::Location::caller().into(),
            );
        }

        /// Log a `format_args!` message at `level`
        #[track_caller]
        pub fn logf(&self, level: $crate::core::LogLevel, args: ::std::fmt::Arguments<'_>) {
            $crate::core::handle::emit_args(
                self,
                level,
                args,
                ::std::panic::Location::caller().into(),
            );
        }
    };
}

macro_rules! impl_leveled_methods {
    () => {
        leveled_methods! {
            Debug => debug, debugf;
            Info => info, infof;
            Warn => warn, warnf;
            Error => error, errorf;
            Fatal => fatal, fatalf;
        }
    };
}
