//! Store tests against real files in a temp directory


/// Common test utilities for services
pub mod common {
    use std::path::PathBuf;
    use tempfile::TempDir;

    pub const MEMBERS_YAML: &str = "members:\n- alice\n- bob\n- carol\n- dave\n";

    pub const ROTATIONS_YAML: &str = "\
rotations:
- start_time: 2025-05-04T00:00:00Z
  members:
  - alice
  - bob
";

    /// Temp directory holding a members file and a rotation file
    pub fn store_dir(members: &str, rotations: &str) -> (TempDir, PathBuf, PathBuf) {
        let dir = TempDir::new().expect("create temp dir");
        let members_path = dir.path().join("rotation-members.yaml");
        let rotations_path = dir.path().join("rotation.yaml");
        std::fs::write(&members_path, members).expect("write members file");
        std::fs::write(&rotations_path, rotations).expect("write rotation file");
        (dir, rotations_path, members_path)
    }
}
