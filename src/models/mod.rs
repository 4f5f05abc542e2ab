mod forms;
mod plan;
mod user;
mod wizard;

pub use forms::{CountForm, FlashQuery, ItemForm, PlanKindForm, RegisterForm, SignInForm};
pub use plan::{Plan, PlanKind, PlanStatus};
pub use user::User;
pub use wizard::{WizardState, WIZARD_SESSION_KEY};
