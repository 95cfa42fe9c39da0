//! Headless harnesses for unit tests.
//!
//! Neither harness needs a tokio runtime or a TTY. Immediate messages
//! ([`Command::message`]) and deferred continuations ([`Command::defer`])
//! are delivered in the same order the real runtime uses; futures and
//! terminal commands are dropped.

use crate::command::Command;
use crate::component::Component;
use crate::effects::Effects;
use crate::model::Model;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// Drives a [`Model`] without a terminal.
///
/// Each [`send`](TestProgram::send) is a full dispatch, deferred
/// continuations included.
///
/// ```rust,ignore
/// let mut prog = TestProgram::<Signup>::new(());
/// prog.send(Msg::Key(key(KeyCode::Enter)));
/// assert!(prog.render_string(40, 10).contains("Country"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    quit: bool,
}

impl<M: Model> TestProgram<M> {
    /// Call [`Model::init`] and run its command.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self { model, quit: false };
        program.run(None, init_cmd);
        program
    }

    /// Dispatch one message.
    pub fn send(&mut self, msg: M::Message) {
        self.run(Some(msg), Command::none());
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Direct access for arranging state without going through `update`.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Whether the model asked to quit.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn render(&self, width: u16, height: u16) -> Buffer {
        render_with(width, height, |frame| self.model.view(frame))
    }

    /// Render and return the buffer as text, one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn run(&mut self, msg: Option<M::Message>, cmd: Command<M::Message>) {
        let mut effects = Effects::new();
        effects.absorb(cmd);
        if let Some(msg) = msg {
            effects.push(msg);
        }
        let model = &mut self.model;
        effects.settle(|msg| model.update(msg));
        self.quit |= effects.quit;
    }
}

/// Drives a single [`Component`], recording every message it emits.
///
/// Emitted messages are fed back into the component (as a parent forwarding
/// them would) and appended to [`emitted`](TestComponent::emitted).
/// [`send`](TestComponent::send) only runs immediate messages; call
/// [`flush`](TestComponent::flush) to run the deferred continuations, which
/// lets tests observe the state between an input event and its deferred
/// follow-up.
///
/// ```rust,ignore
/// let mut t = TestComponent::new(select);
/// t.send(Message::Key(key(KeyCode::Char(' '))));
/// assert!(!t.component().is_expanded());
/// t.flush();
/// assert!(t.component().is_expanded());
/// ```
pub struct TestComponent<C: Component>
where
    C::Message: Clone,
{
    component: C,
    effects: Effects<C::Message>,
    emitted: Vec<C::Message>,
}

impl<C: Component> TestComponent<C>
where
    C::Message: Clone,
{
    pub fn new(component: C) -> Self {
        Self {
            component,
            effects: Effects::new(),
            emitted: Vec::new(),
        }
    }

    /// Deliver `msg` and the immediate messages it produces.
    pub fn send(&mut self, msg: C::Message) {
        let cmd = self.component.update(msg);
        self.effects.absorb(cmd);
        let (component, emitted) = (&mut self.component, &mut self.emitted);
        self.effects.run_ready(&mut |msg: C::Message| {
            emitted.push(msg.clone());
            component.update(msg)
        });
    }

    /// Run pending deferred continuations, round by round.
    pub fn flush(&mut self) {
        let (component, emitted) = (&mut self.component, &mut self.emitted);
        self.effects.run_deferred(&mut |msg: C::Message| {
            emitted.push(msg.clone());
            component.update(msg)
        });
    }

    /// [`send`](TestComponent::send) followed by [`flush`](TestComponent::flush).
    pub fn dispatch(&mut self, msg: C::Message) {
        self.send(msg);
        self.flush();
    }

    pub fn has_deferred(&self) -> bool {
        self.effects.has_deferred()
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Messages emitted so far, in delivery order.
    pub fn emitted(&self) -> &[C::Message] {
        &self.emitted
    }

    pub fn take_emitted(&mut self) -> Vec<C::Message> {
        std::mem::take(&mut self.emitted)
    }

    /// Render the component into the full area of a test buffer.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        render_with(width, height, |frame| {
            let area = frame.area();
            self.component.view(frame, area)
        })
    }

    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }
}

fn render_with(width: u16, height: u16, draw: impl FnOnce(&mut ratatui::Frame)) -> Buffer {
    let backend = ratatui::backend::TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test backend");
    terminal.draw(draw).expect("test backend draw");
    terminal.backend().buffer().clone()
}

/// Concatenate buffer rows into newline-separated text.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area: Rect = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defer::DeferSlot;
    use ratatui::widgets::Paragraph;

    struct Counter {
        count: i64,
    }

    #[derive(Debug)]
    enum CounterMsg {
        Increment,
        Twice,
        Quit,
    }

    impl Model for Counter {
        type Message = CounterMsg;
        type Flags = i64;

        fn init(initial: i64) -> (Self, Command<CounterMsg>) {
            (Counter { count: initial }, Command::none())
        }

        fn update(&mut self, msg: CounterMsg) -> Command<CounterMsg> {
            match msg {
                CounterMsg::Increment => self.count += 1,
                CounterMsg::Twice => {
                    return Command::batch([
                        Command::message(CounterMsg::Increment),
                        Command::message(CounterMsg::Increment),
                    ])
                }
                CounterMsg::Quit => return Command::quit(),
            }
            Command::none()
        }

        fn view(&self, frame: &mut ratatui::Frame) {
            let text = format!("Count: {}", self.count);
            frame.render_widget(Paragraph::new(text), frame.area());
        }
    }

    #[test]
    fn test_program_send_runs_chained_messages() {
        let mut prog = TestProgram::<Counter>::new(5);
        prog.send(CounterMsg::Twice);
        assert_eq!(prog.model().count, 7);
        assert!(prog.render_string(20, 1).contains("Count: 7"));
    }

    #[test]
    fn test_program_quit() {
        let mut prog = TestProgram::<Counter>::new(0);
        assert!(!prog.quit_requested());
        prog.send(CounterMsg::Quit);
        assert!(prog.quit_requested());
    }

    // A component that flips a flag in a deferred continuation.
    struct Flipper {
        on: bool,
        slot: DeferSlot,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum FlipMsg {
        Request,
        Apply,
        Flipped(bool),
    }

    impl Component for Flipper {
        type Message = FlipMsg;

        fn update(&mut self, msg: FlipMsg) -> Command<FlipMsg> {
            match msg {
                FlipMsg::Request => Command::defer(self.slot.schedule(), FlipMsg::Apply),
                FlipMsg::Apply => {
                    self.slot.finish();
                    self.on = !self.on;
                    Command::message(FlipMsg::Flipped(self.on))
                }
                FlipMsg::Flipped(_) => Command::none(),
            }
        }

        fn view(&self, frame: &mut ratatui::Frame, area: Rect) {
            let text = if self.on { "on" } else { "off" };
            frame.render_widget(Paragraph::new(text), area);
        }
    }

    fn flipper() -> TestComponent<Flipper> {
        TestComponent::new(Flipper {
            on: false,
            slot: DeferSlot::new(),
        })
    }

    #[test]
    fn test_component_defers_until_flush() {
        let mut t = flipper();
        t.send(FlipMsg::Request);
        assert!(!t.component().on);
        assert!(t.has_deferred());

        t.flush();
        assert!(t.component().on);
        assert_eq!(t.take_emitted(), vec![FlipMsg::Apply, FlipMsg::Flipped(true)]);
        assert_eq!(t.render_string(3, 1), "on ");
    }

    #[test]
    fn test_component_superseded_continuation_is_skipped() {
        let mut t = flipper();
        t.send(FlipMsg::Request);
        t.send(FlipMsg::Request);
        t.flush();
        assert!(t.component().on);
        assert_eq!(t.emitted().len(), 2);
    }
}
