#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    TodoList,
    Counter,
    UpDown,
    FestivalList,
    NotFound(String),
}

impl Route {
    /// Routes shown in the navigation bar, in order.
    pub const NAVIGABLE: [Route; 5] = [
        Route::Home,
        Route::TodoList,
        Route::Counter,
        Route::UpDown,
        Route::FestivalList,
    ];

    pub fn from_path(path: &str) -> Self {
        match path.trim() {
            "" | "/" => Route::Home,
            "/TodoList" => Route::TodoList,
            "/Counter" => Route::Counter,
            "/UpDown" => Route::UpDown,
            "/FestivalList" => Route::FestivalList,
            other => Route::NotFound(other.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Home => "/",
            Route::TodoList => "/TodoList",
            Route::Counter => "/Counter",
            Route::UpDown => "/UpDown",
            Route::FestivalList => "/FestivalList",
            Route::NotFound(path) => path,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::TodoList => "To-Do",
            Route::Counter => "Counter",
            Route::UpDown => "Up & Down",
            Route::FestivalList => "Festivals",
            Route::NotFound(_) => "Not found",
        }
    }
}
