//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Business rules come from `gasto-core`; repositories
//! orchestrate them against the store.

pub mod budget;
pub mod budget_request;
pub mod category;
pub mod client;
pub mod company;
pub mod department;
pub mod invoice;
pub mod requisition;
pub mod summary;
pub mod supplier;
pub mod transaction;
pub mod user;

pub use budget::{
    BudgetError, BudgetFilter, BudgetRepository, CategoryAvailability, CreateBudgetInput,
    DepartmentAvailability, UpdateBudgetInput,
};
pub use budget_request::{
    ApprovedRequest, BudgetInfo, BudgetRequestRepository, CreateRequestInput,
    DepartmentBudgetInfo, RequestError, UpdateRequestInput,
};
pub use category::{CategoryError, CategoryRepository, CreateCategoryInput, UpdateCategoryInput};
pub use client::{ClientError, ClientRepository, CreateClientInput, UpdateClientInput};
pub use company::{CompanyError, CompanyRepository, UpdateCompanyInput};
pub use department::{
    CreateDepartmentInput, DepartmentError, DepartmentRepository, DepartmentWithUserCount,
    UpdateDepartmentInput,
};
pub use invoice::{CreateInvoiceInput, InvoiceError, InvoiceFilter, InvoiceRepository};
pub use requisition::{
    CreateRequisitionInput, RequisitionError, RequisitionItemInput, RequisitionRepository,
    RequisitionWithDetails, UpdateRequisitionInput,
};
pub use summary::{BudgetStatisticsRow, EmergencyFundReport, SummaryError, SummaryRepository};
pub use supplier::{CreateSupplierInput, SupplierError, SupplierRepository, UpdateSupplierInput};
pub use transaction::{
    CreateTransactionInput, DepartmentTotal, MonthlyTotal, TransactionError,
    TransactionRepository, UpdateTransactionInput,
};
pub use user::{
    CreateUserInput, RegisterCompanyInput, UpdateUserInput, UserError, UserRepository,
};
