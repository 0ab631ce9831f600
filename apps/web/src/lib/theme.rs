//! Shared Tailwind class constants to keep the dashboard visually consistent.

pub struct Theme;

impl Theme {
    /// One user card in the grid.
    pub const CARD: &'static str = "h-full rounded-lg border border-gray-200 bg-white p-4 shadow-sm dark:border-gray-700 dark:bg-gray-800";

    /// Responsive grid holding the cards.
    pub const CARD_GRID: &'static str = "grid gap-4 md:grid-cols-2 lg:grid-cols-3";

    /// Secondary text inside cards and headers.
    pub const MUTED: &'static str = "text-sm text-gray-500 dark:text-gray-400";

    /// Soft blue role badge.
    pub const BADGE: &'static str = "inline-flex items-center rounded px-2 py-0.5 text-xs font-medium bg-blue-50 text-blue-700 dark:bg-blue-900/30 dark:text-blue-200";

    /// Soft pager button; `disabled:` variants cover the clamped ends.
    pub const PAGER_BUTTON: &'static str = "rounded-lg px-4 py-2 text-sm font-medium text-blue-700 bg-blue-50 hover:bg-blue-100 disabled:cursor-not-allowed disabled:opacity-50 dark:bg-blue-900/30 dark:text-blue-200";
}
