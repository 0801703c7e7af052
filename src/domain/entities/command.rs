use crate::application::errors::CommandError;
use crate::application::messaging::handlers::HandlerContext;

/// Command handler function type
pub type CommandHandler = fn(&mut HandlerContext<'_>) -> Result<(), CommandError>;

/// Represents a slash command
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub description: String,
    pub args: Option<String>,
    pub privileged: bool,
    pub handler: CommandHandler,
}

impl Command {
    pub fn new(name: impl Into<String>, description: impl Into<String>, handler: CommandHandler) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            args: None,
            privileged: false,
            handler,
        }
    }

    pub fn with_args(mut self, args: impl Into<String>) -> Self {
        self.args = Some(args.into());
        self
    }

    pub fn privileged(mut self) -> Self {
        self.privileged = true;
        self
    }

    pub fn matches(&self, input: &str) -> bool {
        self.name.eq_ignore_ascii_case(input)
    }

    /// One catalog line, e.g. `/roll [dice] - Rolls dice`
    pub fn usage_line(&self) -> String {
        match &self.args {
            Some(args) => format!("/{} {} - {}", self.name, args, self.description),
            None => format!("/{} - {}", self.name, self.description),
        }
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("privileged", &self.privileged)
            .finish()
    }
}

/// Which table a command was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandTable {
    User,
    Admin,
}

/// Command catalog split into the user and admin tables.
///
/// Tables keep insertion order so the help listing is stable. The registry is
/// built once and never modified while a session runs.
#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    user: Vec<Command>,
    admin: Vec<Command>,
}

impl CommandRegistry {
    pub fn new(user: Vec<Command>, admin: Vec<Command>) -> Self {
        let admin = admin.into_iter().map(Command::privileged).collect();
        Self { user, admin }
    }

    /// Looks in the user table first, then the admin table.
    pub fn find(&self, input: &str) -> Option<(CommandTable, &Command)> {
        if let Some(cmd) = self.user.iter().find(|c| c.matches(input)) {
            return Some((CommandTable::User, cmd));
        }
        self.admin
            .iter()
            .find(|c| c.matches(input))
            .map(|cmd| (CommandTable::Admin, cmd))
    }

    pub fn user_commands(&self) -> &[Command] {
        &self.user
    }

    pub fn admin_commands(&self) -> &[Command] {
        &self.admin
    }

    pub fn len(&self) -> usize {
        self.user.len() + self.admin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.user.is_empty() && self.admin.is_empty()
    }
}
