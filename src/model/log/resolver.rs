use macros::loggable;

loggable! {
    ResolverLog {
        #[error("Resolving owner of {path}")]
        Resolving { path: String } => tracing::Level::DEBUG,

        #[error("Translated {path} to {universal}")]
        Translated { path: String, universal: String } => tracing::Level::DEBUG,

        #[error("No universal name for {path} (system error {code}), using it verbatim")]
        TranslationUnavailable { path: String, code: u32 } => tracing::Level::DEBUG,

        #[error("Resolving SID {sid} against {authority}")]
        LookingUp { sid: String, authority: String } => tracing::Level::DEBUG,

        #[error("Owner of {path} is {owner}")]
        Resolved { path: String, owner: String } => tracing::Level::INFO,

        #[error("Owner of {path} is unknown")]
        Unknown { path: String } => tracing::Level::DEBUG,
    }
}
