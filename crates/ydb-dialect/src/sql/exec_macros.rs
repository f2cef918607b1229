/// Generate the execution methods for a type that can compile itself into a
/// `YdbResult<CompiledQuery>`.
///
/// Every method records its call site, so errors point at the user's
/// `.fetch_*` call rather than at this crate.
///
/// Usage:
/// ```ignore
/// impl_query_exec! {
///     compile(self) {
///         self.compile()
///     }
/// }
/// ```
macro_rules! impl_query_exec {
    (compile($this:ident) $compile:block) => {
        /// Execute and map all rows to `T`.
        #[track_caller]
        pub fn fetch_all<T: $crate::row::FromRow>(
            &$this,
            conn: &impl $crate::connection::DatabaseConnection,
        ) -> impl ::std::future::Future<Output = $crate::error::YdbResult<Vec<T>>> + Send {
            let location = ::std::panic::Location::caller();
            let query = $compile;
            $crate::connection::fetch_all_at(conn, query, location)
        }

        /// Execute and map the **first** row to `T`.
        ///
        /// Returns [`YdbError::NotFound`](crate::YdbError::NotFound) when there are no rows.
        #[track_caller]
        pub fn fetch_one<T: $crate::row::FromRow>(
            &$this,
            conn: &impl $crate::connection::DatabaseConnection,
        ) -> impl ::std::future::Future<Output = $crate::error::YdbResult<T>> + Send {
            let location = ::std::panic::Location::caller();
            let query = $compile;
            $crate::connection::fetch_one_at(conn, query, location)
        }

        /// Execute and map the first row to `T`, if there is one.
        #[track_caller]
        pub fn fetch_opt<T: $crate::row::FromRow>(
            &$this,
            conn: &impl $crate::connection::DatabaseConnection,
        ) -> impl ::std::future::Future<Output = $crate::error::YdbResult<Option<T>>> + Send {
            let location = ::std::panic::Location::caller();
            let query = $compile;
            $crate::connection::fetch_opt_at(conn, query, location)
        }

        /// Execute and discard any rows.
        #[track_caller]
        pub fn execute(
            &$this,
            conn: &impl $crate::connection::DatabaseConnection,
        ) -> impl ::std::future::Future<Output = $crate::error::YdbResult<()>> + Send {
            let location = ::std::panic::Location::caller();
            let query = $compile;
            $crate::connection::execute_at(conn, query, location)
        }
    };
}
