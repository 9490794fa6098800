//! 预导入模块，方便使用

pub use super::announcements::{
    ActiveModel as AnnouncementActiveModel, Entity as Announcements, Model as AnnouncementModel,
};
pub use super::attendance_records::{
    ActiveModel as AttendanceRecordActiveModel, Entity as AttendanceRecords,
    Model as AttendanceRecordModel,
};
pub use super::calendar_events::{
    ActiveModel as CalendarEventActiveModel, Entity as CalendarEvents, Model as CalendarEventModel,
};
pub use super::claims::{ActiveModel as ClaimActiveModel, Entity as Claims, Model as ClaimModel};
pub use super::forum_replies::{
    ActiveModel as ForumReplyActiveModel, Entity as ForumReplies, Model as ForumReplyModel,
};
pub use super::forum_threads::{
    ActiveModel as ForumThreadActiveModel, Entity as ForumThreads, Model as ForumThreadModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::lesson_plans::{
    ActiveModel as LessonPlanActiveModel, Entity as LessonPlans, Model as LessonPlanModel,
};
pub use super::materials::{
    ActiveModel as MaterialActiveModel, Entity as Materials, Model as MaterialModel,
};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::rep_event_registrations::{
    ActiveModel as RepEventRegistrationActiveModel, Entity as RepEventRegistrations,
    Model as RepEventRegistrationModel,
};
pub use super::rep_events::{
    ActiveModel as RepEventActiveModel, Entity as RepEvents, Model as RepEventModel,
};
pub use super::schedule_slots::{
    ActiveModel as ScheduleSlotActiveModel, Entity as ScheduleSlots, Model as ScheduleSlotModel,
};
pub use super::subject_students::{
    ActiveModel as SubjectStudentActiveModel, Entity as SubjectStudents,
    Model as SubjectStudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
