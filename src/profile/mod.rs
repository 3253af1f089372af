pub mod academic;
pub mod init;
pub mod interests;
pub mod storage;
pub mod stream;

pub use academic::{AcademicRecord, Grade, SubjectResult};
pub use init::{collect_profile, parse_subject, run_init_wizard};
pub use interests::{InterestQuestion, InterestVector};
pub use storage::{get_profile_path, load_profile, save_profile, StudentProfile};
pub use stream::Stream;
