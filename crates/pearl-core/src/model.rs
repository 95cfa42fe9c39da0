use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level application trait, following the [Elm Architecture].
///
/// The runtime calls [`init`](Model::init) once, then for every message runs
/// [`update`](Model::update), reconciles [`subscriptions`](Model::subscriptions)
/// and schedules a [`view`](Model::view).
///
/// ```rust,ignore
/// struct Signup { country: Select, country_value: Option<String> }
///
/// enum Msg { Key(KeyEvent), Country(select::Message) }
///
/// impl Model for Signup {
///     type Message = Msg;
///     type Flags = ();
///
///     fn init(_: ()) -> (Self, Command<Msg>) { /* ... */ }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Key(key) => self.country.update(select::Message::Key(key)).map(Msg::Country),
///             Msg::Country(select::Message::Changed(value)) => {
///                 self.country.set_value(Some(value.clone()));
///                 self.country_value = Some(value);
///                 Command::none()
///             }
///             Msg::Country(m) => self.country.update(m).map(Msg::Country),
///         }
///     }
///
///     fn view(&self, frame: &mut Frame) {
///         self.country.view(frame, frame.area());
///     }
/// }
/// ```
///
/// [Elm Architecture]: https://guide.elm-lang.org/architecture/
pub trait Model: Sized + Send + 'static {
    /// Every event that can affect application state.
    type Message: Send + 'static;

    /// Startup data passed to [`Model::init`]. Use `()` when none is needed.
    type Flags: Send + 'static;

    /// Create the initial state and a startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Handle one message and describe follow-up work as a [`Command`].
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state. Must only read `self`.
    fn view(&self, frame: &mut Frame);

    /// Subscriptions that should be running in the current state. Called
    /// after every dispatch; the runtime starts new ones and stops the ones
    /// no longer returned.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
