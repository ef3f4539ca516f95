pub mod enrollment;
pub mod questionnaire;
pub mod session;
pub mod user;

pub use enrollment::Enrollment;
pub use questionnaire::{NewInstance, QuestionnaireInstance};
pub use session::{NewSession, Session, SessionUpdate};
pub use user::{LoginRequest, Role, SignupRequest, User};
