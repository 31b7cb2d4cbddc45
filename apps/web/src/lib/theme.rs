//! Shared Tailwind class constants so forms and cards look the same on every page.

pub struct Theme;

impl Theme {
    /// Centered card used by the signed-out pages.
    pub const AUTH_CARD: &'static str = "w-full max-w-md rounded-xl border border-gray-200 bg-white p-8 shadow-sm dark:border-gray-700 dark:bg-gray-800";

    pub const CARD: &'static str = "rounded-xl border border-gray-200 bg-white p-6 shadow-sm dark:border-gray-700 dark:bg-gray-800";

    pub const PAGE_TITLE: &'static str = "text-2xl font-bold text-gray-900 dark:text-white";

    pub const LABEL: &'static str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";

    pub const INPUT: &'static str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";

    /// Inline message under an input.
    pub const FIELD_ERROR: &'static str = "mt-1 text-xs text-red-600 dark:text-red-400";

    pub const LINK: &'static str = "font-medium text-blue-600 hover:underline dark:text-blue-400";

    /// Material symbol that follows its parent's hover state (via the `group` class).
    pub const ICON: &'static str = "material-symbols-outlined text-gray-400 dark:text-gray-500 group-hover:text-gray-900 dark:group-hover:text-white transition-colors";
}
