pub mod compile_time {
    pub mod lexical {
        /// Maximum expression length in bytes (64KB)
        /// SECURITY: Bounds memory per tokenization request
        pub const MAX_EXPRESSION_LENGTH: usize = 65_536;

        /// Maximum atom name length (255 characters)
        /// SECURITY: Prevents tokenizer complexity attacks
        pub const MAX_ATOM_LENGTH: usize = 255;

        /// Maximum number of tokens in a single expression
        /// SECURITY: Prevents token explosion attacks
        pub const MAX_TOKEN_COUNT: usize = 100_000;
    }

    pub mod syntax {
        /// Maximum parser recursion depth to prevent stack overflow
        /// SECURITY: Bounds deeply nested `!` chains and parentheses
        pub const MAX_PARSE_DEPTH: usize = 100;

        /// Token lookahead limit for parsing decisions
        /// PERFORMANCE: Controls lookahead memory usage
        pub const MAX_LOOKAHEAD_TOKENS: usize = 4;
    }

    pub mod logging {
        /// Maximum log message length
        /// RESOURCE: Prevents memory attacks via huge messages
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;

        /// Maximum events retained by the in-memory test logger
        /// RESOURCE: Prevents unbounded growth in long test runs
        pub const MEMORY_LOGGER_CAPACITY: usize = 10_000;
    }
}
