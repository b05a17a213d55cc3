use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    customer::{Customer, CustomerName},
    form::InputField,
};

/// Form data for creating or editing a customer.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CustomerForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub image_url: String,
}

impl CustomerForm {
    /// Validate the form and convert it into a customer without an ID or
    /// creation time.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyCustomerName] if the name is blank.
    pub fn to_customer(&self) -> Result<Customer, Error> {
        let name = CustomerName::new(&self.name)?;

        Ok(Customer {
            name: name.to_string(),
            phone: self.phone.trim().to_owned(),
            email: self.email.trim().to_owned(),
            address: self.address.trim().to_owned(),
            image_url: self.image_url.trim().to_owned(),
            ..Default::default()
        })
    }
}

impl From<&Customer> for CustomerForm {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            phone: customer.phone.clone(),
            email: customer.email.clone(),
            address: customer.address.clone(),
            image_url: customer.image_url.clone(),
        }
    }
}

pub fn customer_form_fields(form: &CustomerForm) -> Markup {
    html! {
        (InputField::text("name", "Name", &form.name)
            .placeholder("Full name")
            .required()
            .into_html())
        (InputField::text("phone", "Phone", &form.phone)
            .type_("tel")
            .placeholder("0812...")
            .into_html())
        (InputField::text("email", "Email", &form.email).type_("email").into_html())
        (InputField::text("address", "Address", &form.address).into_html())
        (InputField::text("image_url", "Image URL", &form.image_url)
            .type_("url")
            .placeholder("https://...")
            .into_html())
    }
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::CustomerForm;

    #[test]
    fn trims_fields() {
        let form = CustomerForm {
            name: " Rina ".to_owned(),
            phone: " 0812 ".to_owned(),
            ..Default::default()
        };

        let customer = form.to_customer().unwrap();

        assert_eq!(customer.name, "Rina");
        assert_eq!(customer.phone, "0812");
        assert!(customer.created_at.is_none());
    }

    #[test]
    fn rejects_blank_name() {
        assert_eq!(
            CustomerForm::default().to_customer(),
            Err(Error::EmptyCustomerName)
        );
    }
}
