//! Project catalog - the immutable portfolio records and detail view state.

// =============================================================================
// Types
// =============================================================================

/// One portfolio entry. Records are static and read-only; the optional
/// fields feed the detail view and the outbound links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: u32,
    pub title: &'static str,
    pub short_desc: &'static str,
    pub stack: &'static [&'static str],
    pub details: Option<&'static str>,
    pub features: &'static [&'static str],
    pub github_url: Option<&'static str>,
    pub demo_url: Option<&'static str>,
}

/// Ordered, immutable catalog supplied at startup.
pub struct ProjectCatalog {
    projects: Vec<Project>,
    /// Currently opened detail view, if any.
    selected: Option<usize>,
}

impl ProjectCatalog {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            selected: None,
        }
    }

    /// The built-in portfolio entries.
    pub fn builtin() -> Self {
        Self::new(builtin_projects())
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Open the detail view for the project at `index`. Out-of-range
    /// indices are ignored.
    pub fn open_detail(&mut self, index: usize) {
        if index < self.projects.len() {
            self.selected = Some(index);
        }
    }

    /// Close the detail view, returning to the list.
    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    /// The project whose detail view is open.
    pub fn selected(&self) -> Option<&Project> {
        self.selected.and_then(|i| self.projects.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Move the detail view to the next or previous project, wrapping.
    pub fn cycle_detail(&mut self, forward: bool) {
        let Some(current) = self.selected else {
            return;
        };
        let len = self.projects.len();
        if len == 0 {
            return;
        }
        self.selected = Some(if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        });
    }
}

// =============================================================================
// Built-in data
// =============================================================================

fn builtin_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            title: "Autonomous Precision Ag. System",
            short_desc: "Dual-drone fleet coordination using custom Pixhawk firmware. Implements SLAM for crop mapping and localized spraying.",
            stack: &["C++", "Python", "LIDAR", "Jetson Nano", "Pixhawk"],
            details: Some(
                "Developed a coordinated dual-drone system for precision agriculture, featuring custom firmware modifications to Pixhawk flight controllers. The system implements real-time SLAM (Simultaneous Localization and Mapping) using LIDAR sensors for accurate crop mapping and enables targeted pesticide spraying with minimal environmental impact.\n\nThe project integrates computer vision algorithms running on Jetson Nano edge computing devices for real-time crop health analysis. Custom communication protocols ensure reliable coordination between drones, preventing coverage overlap and optimizing flight paths for maximum efficiency.",
            ),
            features: &[
                "Custom Pixhawk firmware with extended telemetry and control APIs",
                "Real-time SLAM implementation using LIDAR point cloud processing",
                "Computer vision-based crop health monitoring with anomaly detection",
                "Multi-drone coordination with collision avoidance algorithms",
                "Precision spraying system with variable flow control",
                "Ground station software for mission planning and monitoring",
            ],
            github_url: None,
            demo_url: None,
        },
        Project {
            id: 2,
            title: "Mars Yard Autonomous Rover",
            short_desc: "6-wheel rover featuring ROS-based navigation stack, rough terrain traversal, and object manipulation.",
            stack: &["ROS", "RealSense D435", "Ubuntu", "Python", "MoveIt"],
            details: Some(
                "Designed and built a 6-wheel rocker-bogie rover inspired by NASA's Mars rovers, capable of autonomous navigation in challenging terrain. The robot runs a full ROS navigation stack with custom path planning algorithms optimized for rough terrain traversal.\n\nEquipped with Intel RealSense D435 depth camera for 3D environment mapping and obstacle detection. The rover features a 4-DOF manipulator arm controlled via MoveIt for object manipulation tasks, making it suitable for sample collection scenarios.",
            ),
            features: &[
                "Rocker-bogie suspension system for maximum ground contact and stability",
                "Custom path planning considering terrain difficulty and rover limitations",
                "Real-time 3D mapping and localization using RealSense depth camera",
                "4-DOF manipulator with inverse kinematics control via MoveIt",
                "Autonomous navigation with dynamic obstacle avoidance",
                "Power management system with solar charging capability",
            ],
            github_url: None,
            demo_url: None,
        },
        Project {
            id: 3,
            title: "Drone PID Position Control",
            short_desc: "Simulation environment for testing aggressive flight maneuvers using cascaded PID loops.",
            stack: &["ROS 2", "Gazebo", "PX4", "Matlab", "Control Theory"],
            details: Some(
                "Built a comprehensive simulation framework for developing and testing aggressive drone flight controllers. The system implements cascaded PID control loops for position, velocity, and attitude control, enabling precise trajectory tracking even during high-speed maneuvers.\n\nUsing PX4 autopilot stack within Gazebo simulation environment, the project includes Matlab/Simulink models for controller tuning and validation. The framework supports Hardware-in-the-Loop (HITL) testing, allowing direct deployment of tuned controllers to physical drones.",
            ),
            features: &[
                "Cascaded PID architecture with position, velocity, and attitude loops",
                "Gazebo physics simulation with realistic aerodynamics modeling",
                "Matlab/Simulink integration for controller design and analysis",
                "Hardware-in-the-Loop (HITL) testing capability",
                "Trajectory generation for aggressive maneuvers (flips, barrel rolls)",
                "Real-time performance metrics and visualization tools",
            ],
            github_url: None,
            demo_url: None,
        },
        Project {
            id: 4,
            title: "Stroke Detection XAI",
            short_desc: "Explainable AI architecture combining CNNs with a meta-learner to identify stroke precursors in CT scans.",
            stack: &["PyTorch", "TensorFlow", "Scikit-Learn", "OpenCV"],
            details: Some(
                "Developed an explainable AI system for early stroke detection from CT scan images. The architecture combines convolutional neural networks (CNNs) for feature extraction with a meta-learning framework that provides interpretable predictions and highlights critical regions in medical images.\n\nThe system achieves high accuracy while maintaining transparency through attention mechanisms and saliency mapping, allowing medical professionals to understand and verify the AI's reasoning process. Trained on a large dataset of annotated CT scans with validation from medical experts.",
            ),
            features: &[
                "CNN-based feature extraction with attention mechanisms",
                "Meta-learner architecture for improved generalization",
                "Grad-CAM visualization for explaining model predictions",
                "Multi-class classification (ischemic, hemorrhagic, normal)",
                "Real-time inference capability for clinical deployment",
                "Comprehensive evaluation metrics with medical expert validation",
            ],
            github_url: None,
            demo_url: None,
        },
        Project {
            id: 5,
            title: "Embedded Systems Suite",
            short_desc: "Collection of hardware builds including custom BMS, IMU sensor fusion modules, and motor controllers.",
            stack: &["STM32", "Altium", "C", "I2C/SPI", "FreeRTOS"],
            details: Some(
                "A collection of custom-designed embedded systems for robotics applications. Projects include a Battery Management System (BMS) with cell balancing and safety features, IMU sensor fusion module for attitude estimation, and high-power motor controllers for autonomous vehicles.\n\nAll systems feature custom PCB designs created in Altium Designer, with firmware written in C running on STM32 microcontrollers. Communication protocols include I2C, SPI, and CAN bus for integration into larger robotic systems.",
            ),
            features: &[
                "Custom BMS with active cell balancing and fault protection",
                "9-axis IMU with Kalman filter-based sensor fusion",
                "Dual-channel motor controller supporting up to 60A continuous",
                "FreeRTOS-based firmware with real-time guarantees",
                "CANbus and UART interfaces for system integration",
                "Over-the-air (OTA) firmware update capability",
            ],
            github_url: None,
            demo_url: None,
        },
    ]
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_has_five_projects() {
        let catalog = ProjectCatalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.projects()[0].title, "Autonomous Precision Ag. System");
        assert_eq!(catalog.projects()[4].title, "Embedded Systems Suite");
    }

    #[test]
    fn test_ids_are_ordered_and_unique() {
        let catalog = ProjectCatalog::builtin();
        let ids: Vec<u32> = catalog.projects().iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_detail_view_open_close() {
        let mut catalog = ProjectCatalog::builtin();
        assert!(catalog.selected().is_none());

        catalog.open_detail(2);
        assert_eq!(catalog.selected().map(|p| p.id), Some(3));

        catalog.close_detail();
        assert!(catalog.selected().is_none());
    }

    #[test]
    fn test_open_detail_out_of_range_ignored() {
        let mut catalog = ProjectCatalog::builtin();
        catalog.open_detail(99);
        assert!(catalog.selected().is_none());
    }

    #[test]
    fn test_cycle_detail_wraps() {
        let mut catalog = ProjectCatalog::builtin();
        catalog.open_detail(4);
        catalog.cycle_detail(true);
        assert_eq!(catalog.selected_index(), Some(0));
        catalog.cycle_detail(false);
        assert_eq!(catalog.selected_index(), Some(4));
    }

    #[test]
    fn test_every_project_carries_stack_and_features() {
        for project in ProjectCatalog::builtin().projects() {
            assert!(!project.stack.is_empty());
            assert!(!project.features.is_empty());
            assert!(project.details.is_some());
        }
    }
}
