//! Input handling for the command line shell
//! Turns resume and job description files into plain text

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use manager::InputManager;

/// Built-in job description used by `analyze --sample-jd`
pub const SAMPLE_JOB_DESCRIPTION: &str = "Job Title: Software Developer

Required Skills:
• Python programming (3+ years experience)
• JavaScript and React framework
• SQL database management
• REST API development
• Git version control
• Problem-solving skills

Preferred Skills:
• Machine Learning experience
• AWS cloud platform
• Docker containerization
• Agile development methodology

Qualifications:
• Bachelor's degree in Computer Science or related field
• 2+ years of software development experience
• Strong analytical and communication skills
• Experience with team collaboration tools";
