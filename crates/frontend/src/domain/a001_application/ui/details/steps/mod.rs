pub mod academic;
pub mod orientation;
pub mod parents;
pub mod personal;
pub mod review;

pub use academic::AcademicStep;
pub use orientation::OrientationStep;
pub use parents::ParentsStep;
pub use personal::PersonalStep;
pub use review::ReviewStep;
